use std::sync::{Arc, Mutex};

use chrono::{NaiveDate, Utc};
use uuid::Uuid;

use hearth_domain::id::{TenantId, UserId};
use hearth_domain::pagination::PageRequest;
use hearth_golf::domain::repository::{CourseRepository, RoundRepository};
use hearth_golf::domain::types::{Course, HoleScore, Round};
use hearth_golf::error::GolfError;
use hearth_outbox::OutboxEvent;

pub type Events = Arc<Mutex<Vec<OutboxEvent>>>;

pub fn owner() -> (TenantId, UserId) {
    (TenantId(Uuid::new_v4()), UserId(Uuid::new_v4()))
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn test_course(tenant_id: TenantId, name: &str, holes: i32, par: i32) -> Course {
    let created = Utc::now();
    Course {
        id: Uuid::now_v7(),
        tenant_id,
        name: name.to_owned(),
        location: None,
        number_of_holes: holes,
        total_par: par,
        course_rating: None,
        slope_rating: None,
        notes: None,
        created_at: created,
        updated_at: created,
    }
}

pub fn test_round(course: &Course, user_id: UserId, played_date: NaiveDate) -> Round {
    let created = Utc::now();
    Round {
        id: Uuid::now_v7(),
        tenant_id: course.tenant_id,
        user_id,
        course_id: course.id,
        played_date,
        total_score: 0,
        total_par: course.total_par,
        weather: None,
        notes: None,
        created_at: created,
        updated_at: created,
    }
}

pub fn test_hole(round: &Round, hole_number: i32, par: i32, score: i32) -> HoleScore {
    HoleScore {
        id: Uuid::now_v7(),
        tenant_id: round.tenant_id,
        round_id: round.id,
        hole_number,
        par,
        score,
        putts: Some(2),
        fairway_hit: false,
        green_in_regulation: false,
        created_at: Utc::now(),
    }
}

// ── MockCourseRepo ───────────────────────────────────────────────────────────

pub struct MockCourseRepo {
    pub courses: Arc<Mutex<Vec<Course>>>,
    /// Course ids that have rounds recorded against them.
    pub in_use: Vec<Uuid>,
    pub events: Events,
}

impl MockCourseRepo {
    pub fn new(courses: Vec<Course>) -> Self {
        Self {
            courses: Arc::new(Mutex::new(courses)),
            in_use: vec![],
            events: Arc::default(),
        }
    }

    pub fn empty() -> Self {
        Self::new(vec![])
    }

    pub fn with_rounds_on(mut self, course_id: Uuid) -> Self {
        self.in_use.push(course_id);
        self
    }

    pub fn courses_handle(&self) -> Arc<Mutex<Vec<Course>>> {
        Arc::clone(&self.courses)
    }

    pub fn events_handle(&self) -> Events {
        Arc::clone(&self.events)
    }
}

impl CourseRepository for MockCourseRepo {
    async fn list(&self, tenant_id: TenantId, page: PageRequest) -> Result<Vec<Course>, GolfError> {
        let mut items: Vec<Course> = self
            .courses
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.tenant_id == tenant_id)
            .cloned()
            .collect();
        items.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(items
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.limit() as usize)
            .collect())
    }

    async fn find_by_id(&self, tenant_id: TenantId, id: Uuid) -> Result<Option<Course>, GolfError> {
        Ok(self
            .courses
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.id == id && c.tenant_id == tenant_id)
            .cloned())
    }

    async fn name_taken(
        &self,
        tenant_id: TenantId,
        name: &str,
        except: Option<Uuid>,
    ) -> Result<bool, GolfError> {
        Ok(self
            .courses
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.tenant_id == tenant_id && c.name == name)
            .any(|c| except != Some(c.id)))
    }

    async fn has_rounds(&self, _tenant_id: TenantId, id: Uuid) -> Result<bool, GolfError> {
        Ok(self.in_use.contains(&id))
    }

    async fn create(&self, course: &Course, event: &OutboxEvent) -> Result<(), GolfError> {
        self.courses.lock().unwrap().push(course.clone());
        self.events.lock().unwrap().push(event.clone());
        Ok(())
    }

    async fn update(&self, course: &Course, event: &OutboxEvent) -> Result<(), GolfError> {
        let mut courses = self.courses.lock().unwrap();
        if let Some(existing) = courses.iter_mut().find(|c| c.id == course.id) {
            *existing = course.clone();
        }
        self.events.lock().unwrap().push(event.clone());
        Ok(())
    }

    async fn delete(
        &self,
        tenant_id: TenantId,
        id: Uuid,
        event: &OutboxEvent,
    ) -> Result<bool, GolfError> {
        let mut courses = self.courses.lock().unwrap();
        let before = courses.len();
        courses.retain(|c| !(c.id == id && c.tenant_id == tenant_id));
        if courses.len() == before {
            return Ok(false);
        }
        self.events.lock().unwrap().push(event.clone());
        Ok(true)
    }
}

// ── MockRoundRepo ────────────────────────────────────────────────────────────

pub struct MockRoundRepo {
    pub rounds: Arc<Mutex<Vec<Round>>>,
    pub holes: Arc<Mutex<Vec<HoleScore>>>,
    pub events: Events,
}

impl MockRoundRepo {
    pub fn new(rounds: Vec<Round>, holes: Vec<HoleScore>) -> Self {
        Self {
            rounds: Arc::new(Mutex::new(rounds)),
            holes: Arc::new(Mutex::new(holes)),
            events: Arc::default(),
        }
    }

    pub fn empty() -> Self {
        Self::new(vec![], vec![])
    }

    pub fn rounds_handle(&self) -> Arc<Mutex<Vec<Round>>> {
        Arc::clone(&self.rounds)
    }

    pub fn holes_handle(&self) -> Arc<Mutex<Vec<HoleScore>>> {
        Arc::clone(&self.holes)
    }

    pub fn events_handle(&self) -> Events {
        Arc::clone(&self.events)
    }

    fn store_totals(&self, round: &Round) {
        let mut rounds = self.rounds.lock().unwrap();
        if let Some(existing) = rounds.iter_mut().find(|r| r.id == round.id) {
            existing.total_score = round.total_score;
            existing.total_par = round.total_par;
            existing.updated_at = round.updated_at;
        }
    }
}

impl RoundRepository for MockRoundRepo {
    async fn list(
        &self,
        tenant_id: TenantId,
        user_id: UserId,
        course_id: Option<Uuid>,
        page: PageRequest,
    ) -> Result<Vec<Round>, GolfError> {
        let mut items: Vec<Round> = self
            .rounds
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.tenant_id == tenant_id && r.user_id == user_id)
            .filter(|r| course_id.is_none_or(|c| r.course_id == c))
            .cloned()
            .collect();
        items.sort_by(|a, b| {
            b.played_date
                .cmp(&a.played_date)
                .then_with(|| b.created_at.cmp(&a.created_at))
        });
        Ok(items
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.limit() as usize)
            .collect())
    }

    async fn find_by_id(
        &self,
        tenant_id: TenantId,
        user_id: UserId,
        id: Uuid,
    ) -> Result<Option<Round>, GolfError> {
        Ok(self
            .rounds
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.id == id && r.tenant_id == tenant_id && r.user_id == user_id)
            .cloned())
    }

    async fn holes(&self, tenant_id: TenantId, round_id: Uuid) -> Result<Vec<HoleScore>, GolfError> {
        let mut holes: Vec<HoleScore> = self
            .holes
            .lock()
            .unwrap()
            .iter()
            .filter(|h| h.tenant_id == tenant_id && h.round_id == round_id)
            .cloned()
            .collect();
        holes.sort_by_key(|h| h.hole_number);
        Ok(holes)
    }

    async fn create(&self, round: &Round, event: &OutboxEvent) -> Result<(), GolfError> {
        self.rounds.lock().unwrap().push(round.clone());
        self.events.lock().unwrap().push(event.clone());
        Ok(())
    }

    async fn update(&self, round: &Round, event: &OutboxEvent) -> Result<(), GolfError> {
        let mut rounds = self.rounds.lock().unwrap();
        if let Some(existing) = rounds.iter_mut().find(|r| r.id == round.id) {
            *existing = round.clone();
        }
        self.events.lock().unwrap().push(event.clone());
        Ok(())
    }

    async fn delete(
        &self,
        tenant_id: TenantId,
        user_id: UserId,
        id: Uuid,
        event: &OutboxEvent,
    ) -> Result<bool, GolfError> {
        let mut rounds = self.rounds.lock().unwrap();
        let before = rounds.len();
        rounds.retain(|r| !(r.id == id && r.tenant_id == tenant_id && r.user_id == user_id));
        if rounds.len() == before {
            return Ok(false);
        }
        self.holes.lock().unwrap().retain(|h| h.round_id != id);
        self.events.lock().unwrap().push(event.clone());
        Ok(true)
    }

    async fn record_hole(
        &self,
        round: &Round,
        hole: &HoleScore,
        event: &OutboxEvent,
    ) -> Result<(), GolfError> {
        {
            let mut holes = self.holes.lock().unwrap();
            match holes
                .iter_mut()
                .find(|h| h.round_id == hole.round_id && h.hole_number == hole.hole_number)
            {
                Some(existing) => *existing = hole.clone(),
                None => holes.push(hole.clone()),
            }
        }
        self.store_totals(round);
        self.events.lock().unwrap().push(event.clone());
        Ok(())
    }

    async fn remove_hole(
        &self,
        round: &Round,
        hole_number: i32,
        event: &OutboxEvent,
    ) -> Result<bool, GolfError> {
        {
            let mut holes = self.holes.lock().unwrap();
            let before = holes.len();
            holes.retain(|h| !(h.round_id == round.id && h.hole_number == hole_number));
            if holes.len() == before {
                return Ok(false);
            }
        }
        self.store_totals(round);
        self.events.lock().unwrap().push(event.clone());
        Ok(true)
    }
}

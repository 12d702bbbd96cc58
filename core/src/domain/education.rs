//! Education: students and modules, linked learning-progress and
//! resource-usage records.

use crate::{
    dist::{render_date, DateWindow, IntRange},
    error::SimResult,
    generator::{Cluster, DomainModel},
    ids::IdFormat,
    links::{LinkPair, LinkSpec},
    name_generator::{NameGender, NameGenerator},
    record::Record,
    rng::SimRng,
    types::Domain,
};
use serde::{Deserialize, Serialize};

use super::{non_empty, strings};

// ── Records ───────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    #[serde(alias = "Student_ID")]
    pub sid: String,
    #[serde(alias = "Name")]
    pub name: String,
    #[serde(alias = "Age")]
    pub age: i64,
    #[serde(alias = "Gender")]
    pub gender: String,
    #[serde(alias = "Course_Enrolled")]
    pub course: String,
    #[serde(alias = "Enrollment_Date")]
    pub enroll_date: String,
    #[serde(alias = "Learning_Style")]
    pub style: String,
    #[serde(alias = "Prior_Grade")]
    pub grade: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Module {
    #[serde(alias = "Module_ID")]
    pub mid: String,
    #[serde(alias = "Module_Name")]
    pub mname: String,
    #[serde(alias = "Course_Name")]
    pub cname: String,
    #[serde(alias = "Difficulty_Level")]
    pub diff: i64,
    #[serde(alias = "Module_Type")]
    pub mtype: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Progress {
    #[serde(alias = "Record_ID")]
    pub rid: String,
    #[serde(alias = "Student_ID")]
    pub sid: String,
    #[serde(alias = "Module_ID")]
    pub mid: String,
    #[serde(alias = "Module_Name")]
    pub mname: String,
    #[serde(alias = "Completion_Percentage")]
    pub completion: i64,
    #[serde(alias = "Time_Spent_Minutes")]
    pub time_spent: i64,
    #[serde(alias = "Quiz_Score")]
    pub quiz: i64,
    #[serde(alias = "Difficulty_Rating")]
    pub difficulty: i64,
    #[serde(alias = "Date")]
    pub date: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceUsage {
    #[serde(alias = "Resource_ID")]
    pub rid: String,
    #[serde(alias = "Student_ID")]
    pub sid: String,
    #[serde(alias = "Resource_Type")]
    pub rtype: String,
    #[serde(alias = "Time_Spent_Minutes")]
    pub spent: i64,
    #[serde(alias = "Completion_Status")]
    pub status: String,
    #[serde(alias = "Access_Date")]
    pub adate: String,
}

impl Record for Student {
    const TABLE: &'static str = "edu_students";
    const KEY: &'static str = "sid";
    const STREAM: &'static str = "student";
    const ID_FORMAT: IdFormat = IdFormat::new("S", 4);

    fn id(&self) -> &str {
        &self.sid
    }
}

impl Record for Module {
    const TABLE: &'static str = "edu_modules";
    const KEY: &'static str = "mid";
    const STREAM: &'static str = "module";
    const ID_FORMAT: IdFormat = IdFormat::new("M", 3);

    fn id(&self) -> &str {
        &self.mid
    }
}

impl Record for Progress {
    const TABLE: &'static str = "edu_progress";
    const KEY: &'static str = "rid";
    const STREAM: &'static str = "progress";
    const ID_FORMAT: IdFormat = IdFormat::new("R", 4);

    fn id(&self) -> &str {
        &self.rid
    }
}

impl Record for ResourceUsage {
    const TABLE: &'static str = "edu_resource_usage";
    const KEY: &'static str = "rid";
    const STREAM: &'static str = "resource";
    const ID_FORMAT: IdFormat = IdFormat::new("RU", 4);

    fn id(&self) -> &str {
        &self.rid
    }
}

// ── Vocabulary & distributions ────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EducationParams {
    pub genders:             Vec<String>,
    pub courses:             Vec<String>,
    pub learning_styles:     Vec<String>,
    pub prior_grades:        Vec<String>,
    pub module_types:        Vec<String>,
    pub resource_types:      Vec<String>,
    pub completion_statuses: Vec<String>,

    pub student_age:      IntRange,
    pub module_difficulty: IntRange,
    pub completion:       IntRange,
    pub time_spent:       IntRange,
    pub quiz_score:       IntRange,
    pub difficulty_rating: IntRange,
    pub resource_minutes: IntRange,
    pub dates:            DateWindow,
}

impl Default for EducationParams {
    fn default() -> Self {
        Self {
            genders: strings(&["Male", "Female"]),
            courses: strings(&["English", "Maths", "Science", "Social Science", "Computer"]),
            learning_styles: strings(&["Visual", "Kinesthetic", "Auditory", "Reading/Writing"]),
            prior_grades: strings(&["A", "B+", "B", "C+", "C"]),
            module_types: strings(&["Quiz", "Video", "PDF", "Assignment"]),
            resource_types: strings(&["Quiz", "Video", "PDF", "Assignment"]),
            completion_statuses: strings(&["In Progress", "Not Started", "Completed"]),
            student_age:       IntRange::new(14, 18),
            module_difficulty: IntRange::new(1, 10),
            completion:        IntRange::new(10, 100),
            time_spent:        IntRange::new(60, 400),
            quiz_score:        IntRange::new(1, 100),
            difficulty_rating: IntRange::new(1, 5),
            resource_minutes:  IntRange::new(5, 300),
            dates:             DateWindow::default(),
        }
    }
}

// ── Model ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default)]
pub struct EducationModel {
    pub params: EducationParams,
}

impl EducationModel {
    pub fn new(params: EducationParams) -> Self {
        Self { params }
    }
}

impl DomainModel for EducationModel {
    type MasterA = Student;
    type MasterB = Module;
    type DependentA = Progress;
    type DependentB = ResourceUsage;

    const DOMAIN: Domain = Domain::Education;
    const LINK: LinkSpec = LinkSpec {
        table:    "edu_mem",
        column_a: "record_id",
        column_b: "resource_id",
        format_a: Progress::ID_FORMAT,
        format_b: ResourceUsage::ID_FORMAT,
    };

    fn validate(&self) -> SimResult<()> {
        let p = &self.params;
        non_empty("education.genders", &p.genders)?;
        non_empty("education.courses", &p.courses)?;
        non_empty("education.learning_styles", &p.learning_styles)?;
        non_empty("education.prior_grades", &p.prior_grades)?;
        non_empty("education.module_types", &p.module_types)?;
        non_empty("education.resource_types", &p.resource_types)?;
        non_empty("education.completion_statuses", &p.completion_statuses)
    }

    fn mint_master_a(&self, sid: String, _seq: u64, rng: &mut SimRng) -> Student {
        let p = &self.params;
        let gender = rng.pick(&p.genders).clone();
        let name_list = match gender.as_str() {
            "Male" => NameGender::Male,
            "Female" => NameGender::Female,
            _ => NameGender::Any,
        };
        Student {
            sid,
            name: NameGenerator::first_name(rng, name_list).to_string(),
            age: p.student_age.sample(rng),
            gender,
            course: rng.pick(&p.courses).clone(),
            enroll_date: render_date(p.dates.sample(rng)),
            style: rng.pick(&p.learning_styles).clone(),
            grade: rng.pick(&p.prior_grades).clone(),
        }
    }

    fn mint_master_b(&self, mid: String, seq: u64, rng: &mut SimRng) -> Module {
        let p = &self.params;
        Module {
            mid,
            mname: format!("Module{seq}"),
            cname: rng.pick(&p.courses).clone(),
            diff: p.module_difficulty.sample(rng),
            mtype: rng.pick(&p.module_types).clone(),
        }
    }

    fn build_dependents(
        &self,
        student: &Student,
        module: &Module,
        ids: &LinkPair,
        rng: &mut SimRng,
    ) -> (Progress, ResourceUsage) {
        let p = &self.params;
        let progress = Progress {
            rid: ids.a.clone(),
            sid: student.sid.clone(),
            mid: module.mid.clone(),
            mname: module.mname.clone(),
            completion: p.completion.sample(rng),
            time_spent: p.time_spent.sample(rng),
            quiz: p.quiz_score.sample(rng),
            difficulty: p.difficulty_rating.sample(rng),
            date: render_date(p.dates.sample(rng)),
        };
        let resource = ResourceUsage {
            rid: ids.b.clone(),
            sid: student.sid.clone(),
            rtype: rng.pick(&p.resource_types).clone(),
            spent: p.resource_minutes.sample(rng),
            status: rng.pick(&p.completion_statuses).clone(),
            adate: render_date(p.dates.sample(rng)),
        };
        (progress, resource)
    }

    fn progress_line(c: &Cluster<Self>) -> String {
        format!(
            "REC {} | RES {} | STUD {} | MOD {}",
            c.dependent_a.rid, c.dependent_b.rid, c.master_a.sid, c.master_b.mid
        )
    }
}

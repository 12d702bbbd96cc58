//! Manufacturing: equipment and technicians, linked downtime and
//! maintenance events.

use crate::{
    dist::{render_date, DateWindow, IntRange, MoneyRange},
    error::SimResult,
    generator::{Cluster, DomainModel},
    ids::IdFormat,
    links::{LinkPair, LinkSpec},
    name_generator::NameGenerator,
    record::Record,
    rng::SimRng,
    types::Domain,
};
use chrono::Duration;
use serde::{Deserialize, Serialize};

use super::{non_empty, strings};

// ── Records ───────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Equipment {
    #[serde(alias = "Equipment_ID")]
    pub eq_id: String,
    #[serde(alias = "Equipment_Name")]
    pub name: String,
    #[serde(alias = "Equipment_Type")]
    pub etype: String,
    #[serde(alias = "Manufacturer")]
    pub manufacturer: String,
    #[serde(alias = "Installation_Date")]
    pub install_date: String,
    #[serde(alias = "Maintenance_Cycle_Days")]
    pub cycle_days: i64,
    #[serde(alias = "Location")]
    pub location: String,
    #[serde(alias = "Capacity_per_Hour")]
    pub capacity: i64,
    #[serde(alias = "Criticality_Score")]
    pub criticality: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Technician {
    #[serde(alias = "Technician_ID")]
    pub tid: String,
    #[serde(alias = "Name")]
    pub name: String,
    #[serde(alias = "Age")]
    pub age: i64,
    #[serde(alias = "Phone")]
    pub phone: String,
    #[serde(alias = "Level")]
    pub level: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Downtime {
    #[serde(alias = "Downtime_ID")]
    pub dt_id: String,
    #[serde(alias = "Equipment_ID")]
    pub eq_id: String,
    #[serde(alias = "Start_Time")]
    pub start: String,
    #[serde(alias = "End_Time")]
    pub end: String,
    /// Elapsed whole minutes between start and end.
    #[serde(alias = "Duration_Minutes")]
    pub duration: i64,
    #[serde(alias = "Root_Cause")]
    pub root: String,
    #[serde(alias = "Technician_ID")]
    pub tech: String,
    #[serde(alias = "Comments")]
    pub comments: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Maintenance {
    #[serde(alias = "Maintenance_ID")]
    pub mt_id: String,
    #[serde(alias = "Equipment_ID")]
    pub eq_id: String,
    #[serde(alias = "Maintenance_Date")]
    pub date: String,
    #[serde(alias = "Maintenance_Type")]
    pub mtype: String,
    #[serde(alias = "Parts_Replaced")]
    pub parts: String,
    #[serde(alias = "Technician_ID")]
    pub tech: String,
    #[serde(alias = "Cost")]
    pub cost: f64,
    #[serde(alias = "MTTR_Minutes")]
    pub mttr: i64,
    #[serde(alias = "Remarks")]
    pub remarks: String,
}

impl Record for Equipment {
    const TABLE: &'static str = "mfg_equipments";
    const KEY: &'static str = "eq_id";
    const STREAM: &'static str = "equipment";
    const ID_FORMAT: IdFormat = IdFormat::new("EQT", 3);

    fn id(&self) -> &str {
        &self.eq_id
    }
}

impl Record for Technician {
    const TABLE: &'static str = "mfg_technicians";
    const KEY: &'static str = "tid";
    const STREAM: &'static str = "technician";
    const ID_FORMAT: IdFormat = IdFormat::new("T", 3);

    fn id(&self) -> &str {
        &self.tid
    }
}

impl Record for Downtime {
    const TABLE: &'static str = "mfg_downtime";
    const KEY: &'static str = "dt_id";
    const STREAM: &'static str = "downtime";
    const ID_FORMAT: IdFormat = IdFormat::new("DT", 3);

    fn id(&self) -> &str {
        &self.dt_id
    }
}

impl Record for Maintenance {
    const TABLE: &'static str = "mfg_maintenance";
    const KEY: &'static str = "mt_id";
    const STREAM: &'static str = "maintenance";
    const ID_FORMAT: IdFormat = IdFormat::new("MT", 3);

    fn id(&self) -> &str {
        &self.mt_id
    }
}

// ── Vocabulary & distributions ────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ManufacturingParams {
    pub equipment_types:   Vec<String>,
    pub manufacturers:     Vec<String>,
    pub cycle_days:        Vec<i64>,
    pub locations:         Vec<String>,
    pub root_causes:       Vec<String>,
    pub downtime_comments: Vec<String>,
    pub maintenance_types: Vec<String>,
    pub parts_replaced:    Vec<String>,
    pub remarks:           Vec<String>,
    pub levels:            Vec<String>,

    pub capacity:          IntRange,
    pub criticality:       IntRange,
    pub technician_age:    IntRange,
    /// Minutes added to a downtime start to get its end.
    pub downtime_minutes:  IntRange,
    pub maintenance_cost:  MoneyRange,
    pub mttr_minutes:      IntRange,
    pub dates:             DateWindow,
}

impl Default for ManufacturingParams {
    fn default() -> Self {
        Self {
            equipment_types: strings(&["Press", "Milling", "Assembly_Robot", "Lathe"]),
            manufacturers: strings(&["Mitsubishi", "ABB", "Siemens", "Bosch", "Makita", "DEWALT"]),
            cycle_days: vec![20, 30, 60, 45, 90, 120],
            locations: strings(&["Plant A", "Plant B", "Plant C", "Plant D", "Plant Z12"]),
            root_causes: strings(&[
                "Routine Check", "Power Loss", "Bearing Failure", "Overheating", "Misalignment",
            ]),
            downtime_comments: strings(&["Fixed promptly", "Monitoring required", "Replacement needed"]),
            maintenance_types: strings(&["Inspection", "Corrective", "Preventive"]),
            parts_replaced: strings(&["Hydraulics", "None", "Motor", "Sensor", "Bearing"]),
            remarks: strings(&["Needs follow-up", "Operational", "Issue resolved"]),
            levels: strings(&["Senior", "Assistant", "Junior"]),
            capacity:         IntRange::new(80, 500),
            criticality:      IntRange::new(1, 10),
            technician_age:   IntRange::new(20, 60),
            downtime_minutes: IntRange::new(20, 800),
            maintenance_cost: MoneyRange::new(300.0, 5000.0),
            mttr_minutes:     IntRange::new(60, 400),
            dates:            DateWindow::default(),
        }
    }
}

// ── Model ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default)]
pub struct ManufacturingModel {
    pub params: ManufacturingParams,
}

impl ManufacturingModel {
    pub fn new(params: ManufacturingParams) -> Self {
        Self { params }
    }
}

/// Ten digits, the first in 6..=9.
fn phone_number(rng: &mut SimRng) -> String {
    let mut number = rng.int_between(6, 9).to_string();
    for _ in 0..9 {
        number.push_str(&rng.int_between(0, 9).to_string());
    }
    number
}

impl DomainModel for ManufacturingModel {
    type MasterA = Equipment;
    type MasterB = Technician;
    type DependentA = Downtime;
    type DependentB = Maintenance;

    const DOMAIN: Domain = Domain::Manufacturing;
    const LINK: LinkSpec = LinkSpec {
        table:    "mfg_mem",
        column_a: "downtime_id",
        column_b: "maintenance_id",
        format_a: Downtime::ID_FORMAT,
        format_b: Maintenance::ID_FORMAT,
    };

    fn validate(&self) -> SimResult<()> {
        let p = &self.params;
        non_empty("manufacturing.equipment_types", &p.equipment_types)?;
        non_empty("manufacturing.manufacturers", &p.manufacturers)?;
        non_empty("manufacturing.cycle_days", &p.cycle_days)?;
        non_empty("manufacturing.locations", &p.locations)?;
        non_empty("manufacturing.root_causes", &p.root_causes)?;
        non_empty("manufacturing.downtime_comments", &p.downtime_comments)?;
        non_empty("manufacturing.maintenance_types", &p.maintenance_types)?;
        non_empty("manufacturing.parts_replaced", &p.parts_replaced)?;
        non_empty("manufacturing.remarks", &p.remarks)?;
        non_empty("manufacturing.levels", &p.levels)
    }

    fn mint_master_a(&self, eq_id: String, seq: u64, rng: &mut SimRng) -> Equipment {
        let p = &self.params;
        Equipment {
            eq_id,
            name: format!("Machine_{seq}"),
            etype: rng.pick(&p.equipment_types).clone(),
            manufacturer: rng.pick(&p.manufacturers).clone(),
            install_date: render_date(p.dates.sample(rng)),
            cycle_days: *rng.pick(&p.cycle_days),
            location: rng.pick(&p.locations).clone(),
            capacity: p.capacity.sample(rng),
            criticality: p.criticality.sample(rng),
        }
    }

    fn mint_master_b(&self, tid: String, _seq: u64, rng: &mut SimRng) -> Technician {
        let p = &self.params;
        Technician {
            tid,
            name: NameGenerator::full_name(rng),
            age: p.technician_age.sample(rng),
            phone: phone_number(rng),
            level: rng.pick(&p.levels).clone(),
        }
    }

    fn build_dependents(
        &self,
        equipment: &Equipment,
        technician: &Technician,
        ids: &LinkPair,
        rng: &mut SimRng,
    ) -> (Downtime, Maintenance) {
        let p = &self.params;

        let start = p.dates.sample_datetime(rng);
        let end = start + Duration::minutes(p.downtime_minutes.sample(rng));
        let downtime = Downtime {
            dt_id: ids.a.clone(),
            eq_id: equipment.eq_id.clone(),
            start: render_date(start.date()),
            end: render_date(end.date()),
            duration: (end - start).num_minutes(),
            root: rng.pick(&p.root_causes).clone(),
            tech: technician.tid.clone(),
            comments: rng.pick(&p.downtime_comments).clone(),
        };

        let maintenance = Maintenance {
            mt_id: ids.b.clone(),
            eq_id: equipment.eq_id.clone(),
            date: render_date(p.dates.sample(rng)),
            mtype: rng.pick(&p.maintenance_types).clone(),
            parts: rng.pick(&p.parts_replaced).clone(),
            tech: technician.tid.clone(),
            cost: p.maintenance_cost.sample(rng),
            mttr: p.mttr_minutes.sample(rng),
            remarks: rng.pick(&p.remarks).clone(),
        };

        (downtime, maintenance)
    }

    fn progress_line(c: &Cluster<Self>) -> String {
        format!(
            "DT {} | MT {} | EQ {} | TECH {}",
            c.dependent_a.dt_id, c.dependent_b.mt_id, c.master_a.eq_id, c.master_b.tid
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phone_numbers_have_ten_digits_and_mobile_prefix() {
        let mut rng = SimRng::new(21, 0);
        for _ in 0..100 {
            let phone = phone_number(&mut rng);
            assert_eq!(phone.len(), 10);
            assert!(phone.bytes().all(|b| b.is_ascii_digit()));
            assert!(matches!(phone.as_bytes()[0], b'6'..=b'9'));
        }
    }
}

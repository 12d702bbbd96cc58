//! Deterministic person-name generation using curated name lists.
//!
//! Used for store managers, technicians and students.
//! All generation is deterministic (same RNG seed = same names).

use crate::rng::SimRng;

/// Which first-name list to draw from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameGender {
    Male,
    Female,
    Any,
}

/// Deterministic name generator using curated name lists
pub struct NameGenerator;

impl NameGenerator {
    /// Generate a full name (first + last) deterministically
    pub fn full_name(rng: &mut SimRng) -> String {
        let first = Self::first_name(rng, NameGender::Any);
        let last = Self::last_name(rng);
        format!("{first} {last}")
    }

    /// Generate a first name from the list matching `gender`
    pub fn first_name(rng: &mut SimRng, gender: NameGender) -> &'static str {
        let gender = match gender {
            NameGender::Any if rng.chance(0.5) => NameGender::Male,
            NameGender::Any => NameGender::Female,
            g => g,
        };
        match gender {
            NameGender::Male => *rng.pick(Self::male_first_names()),
            _ => *rng.pick(Self::female_first_names()),
        }
    }

    pub fn last_name(rng: &mut SimRng) -> &'static str {
        *rng.pick(Self::last_names())
    }

    fn male_first_names() -> &'static [&'static str] {
        &[
            "Aarav", "Vivaan", "Aditya", "Arjun", "Sai", "Reyansh", "Krishna", "Ishaan",
            "Rohan", "Karan", "Rahul", "Vikram", "Sanjay", "Imran", "Nikhil", "Pranav",
            "Harsh", "Manish", "Suresh", "Ramesh", "Deepak", "Anil", "Sunil", "Varun",
            "Kunal", "Yash", "Siddharth", "Abhishek", "Gaurav", "Naveen", "Farhan", "Rajesh",
            "Mohit", "Ajay", "Vijay", "Tarun", "Ashwin", "Kabir", "Dev", "Ravi",
        ]
    }

    fn female_first_names() -> &'static [&'static str] {
        &[
            "Priya", "Ananya", "Kavya", "Neha", "Pooja", "Divya", "Meera", "Fatima",
            "Aditi", "Isha", "Sneha", "Riya", "Shruti", "Nisha", "Lakshmi", "Anjali",
            "Deepika", "Swati", "Pallavi", "Sakshi", "Tanvi", "Aisha", "Sunita", "Rekha",
            "Geeta", "Kiran", "Nandini", "Radhika", "Shreya", "Bhavana", "Harini", "Zoya",
            "Madhuri", "Asha", "Jyoti", "Sana", "Vidya", "Keerthi", "Ira", "Diya",
        ]
    }

    fn last_names() -> &'static [&'static str] {
        &[
            "Sharma", "Verma", "Patel", "Iyer", "Reddy", "Nair", "Gupta", "Khan",
            "Mehta", "Singh", "Kumar", "Das", "Bose", "Chatterjee", "Mukherjee", "Banerjee",
            "Rao", "Menon", "Pillai", "Joshi", "Kulkarni", "Deshpande", "Shah", "Desai",
            "Agarwal", "Malhotra", "Kapoor", "Chopra", "Bhat", "Hegde", "Naidu", "Choudhary",
            "Saxena", "Mishra", "Pandey", "Tiwari", "Qureshi", "Fernandes", "D'Souza", "Gill",
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::{RngBank, RngSlot};

    #[test]
    fn name_generation_is_deterministic() {
        let mut rng1 = RngBank::new(12345).for_slot_at_tick(RngSlot::MasterB, 1);
        let mut rng2 = RngBank::new(12345).for_slot_at_tick(RngSlot::MasterB, 1);

        assert_eq!(
            NameGenerator::full_name(&mut rng1),
            NameGenerator::full_name(&mut rng2),
            "Same seed should produce same name"
        );
    }

    #[test]
    fn generates_valid_full_names() {
        let mut rng = RngBank::new(12345).for_slot_at_tick(RngSlot::MasterB, 1);

        for _ in 0..100 {
            let name = NameGenerator::full_name(&mut rng);
            let parts: Vec<&str> = name.split_whitespace().collect();
            assert_eq!(parts.len(), 2, "Name should have exactly 2 parts: {name}");
        }
    }

    #[test]
    fn gendered_first_names_come_from_matching_list() {
        let mut rng = RngBank::new(7).for_slot_at_tick(RngSlot::MasterA, 3);
        for _ in 0..50 {
            let male = NameGenerator::first_name(&mut rng, NameGender::Male);
            assert!(NameGenerator::male_first_names().contains(&male));
            let female = NameGenerator::first_name(&mut rng, NameGender::Female);
            assert!(NameGenerator::female_first_names().contains(&female));
        }
    }
}

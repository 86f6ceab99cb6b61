use crate::{
    data::student::{BloodStatus, Student},
    error::{
        AlreadyExpelledSnafu, ExpulsionExemptSnafu, MissingStudentSnafu, NotPureBloodSnafu,
        RosterResult,
    },
    query::ListSettings,
};
use rand::Rng;
use snafu::OptionExt;
use uuid::Uuid;

/// The one identity expulsion can never touch.
const EXPEL_EXEMPT: (&str, &str) = ("Hermione", "Granger");

/// The whole application state: the active and expelled collections plus the
/// current list settings. All mutation goes through the methods below.
#[derive(Debug)]
pub struct Roster {
    active: Vec<Student>,
    expelled: Vec<Student>,
    pub settings: ListSettings,
}

/// What `toggle_prefect` did, or what it still needs from the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrefectOutcome {
    Cleared,
    Appointed,
    /// A prefect of the same house and gender is already sitting; nothing was
    /// changed. The caller must confirm via `replace_prefect`.
    NeedsConfirmation { incumbent: Uuid },
}

impl Roster {
    pub fn new(active: Vec<Student>) -> Self {
        Self {
            active,
            expelled: Vec::new(),
            settings: ListSettings::default(),
        }
    }

    pub fn active(&self) -> &[Student] {
        &self.active
    }

    pub fn expelled(&self) -> &[Student] {
        &self.expelled
    }

    pub fn find(&self, id: Uuid) -> Option<&Student> {
        self.active
            .iter()
            .chain(self.expelled.iter())
            .find(|student| student.id == id)
    }

    pub fn is_expelled(&self, id: Uuid) -> bool {
        self.expelled.iter().any(|student| student.id == id)
    }

    fn active_position(&self, id: Uuid) -> RosterResult<usize> {
        self.active
            .iter()
            .position(|student| student.id == id)
            .context(MissingStudentSnafu { id })
    }

    /// At most one prefect per (house, gender) pair holds at any time.
    pub fn toggle_prefect(&mut self, id: Uuid) -> RosterResult<PrefectOutcome> {
        let target = self.active_position(id)?;

        if self.active[target].prefect {
            self.active[target].prefect = false;
            return Ok(PrefectOutcome::Cleared);
        }

        let house = self.active[target].house.clone();
        let gender = self.active[target].gender;
        let incumbent = self
            .active
            .iter()
            .find(|student| student.prefect && student.house == house && student.gender == gender);

        match incumbent {
            Some(incumbent) => Ok(PrefectOutcome::NeedsConfirmation {
                incumbent: incumbent.id,
            }),
            None => {
                self.active[target].prefect = true;
                Ok(PrefectOutcome::Appointed)
            }
        }
    }

    /// The confirmed half of the prefect flow: clears the incumbent and
    /// appoints the target in one step.
    pub fn replace_prefect(&mut self, incumbent: Uuid, target: Uuid) -> RosterResult<()> {
        let incumbent = self.active_position(incumbent)?;
        let target = self.active_position(target)?;

        self.active[incumbent].prefect = false;
        self.active[target].prefect = true;
        Ok(())
    }

    /// Only pure-blood students may join the squad.
    pub fn toggle_inquisitorial(&mut self, id: Uuid) -> RosterResult<()> {
        let target = self.active_position(id)?;
        let student = &mut self.active[target];

        if student.inquisitorial {
            student.inquisitorial = false;
            return Ok(());
        }

        snafu::ensure!(
            student.blood_status == BloodStatus::PureBlood,
            NotPureBloodSnafu {
                first_name: student.first_name.clone(),
                last_name: student.last_name.clone(),
                blood_status: student.blood_status.as_str().to_lowercase(),
                gender: student.gender.as_str().to_lowercase(),
            }
        );

        student.inquisitorial = true;
        Ok(())
    }

    /// Moves a student to the expelled collection, exactly once. An expelled
    /// student holds no responsibilities, so both role flags are cleared.
    pub fn expel(&mut self, id: Uuid) -> RosterResult<()> {
        if let Some(student) = self.expelled.iter().find(|student| student.id == id) {
            return AlreadyExpelledSnafu {
                first_name: student.first_name.clone(),
                last_name: student.last_name.clone(),
            }
            .fail();
        }

        let target = self.active_position(id)?;
        let student = &self.active[target];
        snafu::ensure!(
            !(student.first_name == EXPEL_EXEMPT.0 && student.last_name == EXPEL_EXEMPT.1),
            ExpulsionExemptSnafu {
                first_name: student.first_name.clone(),
                last_name: student.last_name.clone(),
            }
        );

        let mut student = self.active.remove(target);
        student.prefect = false;
        student.inquisitorial = false;
        self.expelled.push(student);
        Ok(())
    }

    /// Demo "hack": independently resamples every active student's blood
    /// status, uniformly over the three categories. Not idempotent.
    pub fn reroll_blood_statuses(&mut self, rng: &mut impl Rng) {
        for student in &mut self.active {
            student.blood_status = match rng.random_range(0..3) {
                0 => BloodStatus::PureBlood,
                1 => BloodStatus::HalfBlood,
                _ => BloodStatus::MuggleBorn,
            };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::student::{BloodFamilies, Gender, House, RawStudent};
    use crate::error::RosterError;
    use rand::{SeedableRng, rngs::StdRng};
    use std::collections::HashMap;

    fn student(fullname: &str, gender: &str, house: &str, families: &BloodFamilies) -> Student {
        Student::prepare(
            &RawStudent {
                fullname: fullname.to_string(),
                gender: gender.to_string(),
                house: house.to_string(),
            },
            families,
        )
    }

    fn pure_families() -> BloodFamilies {
        BloodFamilies {
            pure: vec!["Malfoy".to_string(), "Parkinson".to_string()],
            half: Vec::new(),
        }
    }

    fn sample_roster() -> Roster {
        let families = pure_families();
        Roster::new(vec![
            student("Hermione Jean Granger", "Girl", "Gryffindor", &families),
            student("Harry James Potter", "Boy", "Gryffindor", &families),
            student("Ginevra Molly Weasley", "Girl", "Gryffindor", &families),
            student("Draco Malfoy", "Boy", "Slytherin", &families),
            student("Pansy Parkinson", "Girl", "Slytherin", &families),
        ])
    }

    fn id_of(roster: &Roster, first_name: &str) -> Uuid {
        roster
            .active()
            .iter()
            .find(|s| s.first_name == first_name)
            .unwrap()
            .id
    }

    fn assert_prefect_invariant(roster: &Roster) {
        let mut per_slot: HashMap<(House, Gender), usize> = HashMap::new();
        for student in roster.active().iter().filter(|s| s.prefect) {
            *per_slot
                .entry((student.house.clone(), student.gender))
                .or_default() += 1;
        }
        assert!(
            per_slot.values().all(|&count| count <= 1),
            "more than one prefect in a (house, gender) slot"
        );
    }

    #[test]
    fn prefect_appointed_when_slot_is_free() {
        let mut roster = sample_roster();
        let hermione = id_of(&roster, "Hermione");

        assert_eq!(
            roster.toggle_prefect(hermione).unwrap(),
            PrefectOutcome::Appointed
        );
        assert!(roster.find(hermione).unwrap().prefect);
        assert_prefect_invariant(&roster);
    }

    #[test]
    fn prefect_toggle_clears_a_sitting_prefect() {
        let mut roster = sample_roster();
        let hermione = id_of(&roster, "Hermione");

        roster.toggle_prefect(hermione).unwrap();
        assert_eq!(
            roster.toggle_prefect(hermione).unwrap(),
            PrefectOutcome::Cleared
        );
        assert!(!roster.find(hermione).unwrap().prefect);
    }

    #[test]
    fn prefect_conflict_requires_confirmation_and_changes_nothing() {
        let mut roster = sample_roster();
        let hermione = id_of(&roster, "Hermione");
        let ginevra = id_of(&roster, "Ginevra");

        roster.toggle_prefect(hermione).unwrap();
        assert_eq!(
            roster.toggle_prefect(ginevra).unwrap(),
            PrefectOutcome::NeedsConfirmation {
                incumbent: hermione
            }
        );
        assert!(roster.find(hermione).unwrap().prefect);
        assert!(!roster.find(ginevra).unwrap().prefect);
        assert_prefect_invariant(&roster);
    }

    #[test]
    fn replace_prefect_swaps_the_slot() {
        let mut roster = sample_roster();
        let hermione = id_of(&roster, "Hermione");
        let ginevra = id_of(&roster, "Ginevra");

        roster.toggle_prefect(hermione).unwrap();
        roster.replace_prefect(hermione, ginevra).unwrap();

        assert!(!roster.find(hermione).unwrap().prefect);
        assert!(roster.find(ginevra).unwrap().prefect);
        assert_prefect_invariant(&roster);
    }

    #[test]
    fn prefects_of_different_genders_share_a_house() {
        let mut roster = sample_roster();
        let hermione = id_of(&roster, "Hermione");
        let harry = id_of(&roster, "Harry");

        assert_eq!(
            roster.toggle_prefect(hermione).unwrap(),
            PrefectOutcome::Appointed
        );
        assert_eq!(
            roster.toggle_prefect(harry).unwrap(),
            PrefectOutcome::Appointed
        );
        assert_prefect_invariant(&roster);
    }

    #[test]
    fn inquisitorial_requires_pure_blood() {
        let mut roster = sample_roster();
        let draco = id_of(&roster, "Draco");
        let harry = id_of(&roster, "Harry");

        roster.toggle_inquisitorial(draco).unwrap();
        assert!(roster.find(draco).unwrap().inquisitorial);
        roster.toggle_inquisitorial(draco).unwrap();
        assert!(!roster.find(draco).unwrap().inquisitorial);

        let err = roster.toggle_inquisitorial(harry).unwrap_err();
        assert!(matches!(err, RosterError::NotPureBlood { .. }));
        assert!(!roster.find(harry).unwrap().inquisitorial);
    }

    #[test]
    fn expel_moves_exactly_once_and_clears_roles() {
        let mut roster = sample_roster();
        let pansy = id_of(&roster, "Pansy");

        roster.toggle_prefect(pansy).unwrap();
        roster.toggle_inquisitorial(pansy).unwrap();
        roster.expel(pansy).unwrap();

        assert!(roster.is_expelled(pansy));
        assert!(roster.active().iter().all(|s| s.id != pansy));
        let expelled = roster.find(pansy).unwrap();
        assert!(!expelled.prefect);
        assert!(!expelled.inquisitorial);

        let err = roster.expel(pansy).unwrap_err();
        assert!(matches!(err, RosterError::AlreadyExpelled { .. }));
        assert!(roster.is_expelled(pansy));
    }

    #[test]
    fn the_exempt_identity_cannot_be_expelled() {
        let mut roster = sample_roster();
        let hermione = id_of(&roster, "Hermione");

        let err = roster.expel(hermione).unwrap_err();
        assert!(matches!(err, RosterError::ExpulsionExempt { .. }));
        assert!(!roster.is_expelled(hermione));
        assert!(roster.active().iter().any(|s| s.id == hermione));
    }

    #[test]
    fn mutating_an_unknown_id_is_rejected() {
        let mut roster = sample_roster();
        let bogus = Uuid::new_v4();

        assert!(matches!(
            roster.toggle_prefect(bogus).unwrap_err(),
            RosterError::MissingStudent { .. }
        ));
        assert!(matches!(
            roster.toggle_inquisitorial(bogus).unwrap_err(),
            RosterError::MissingStudent { .. }
        ));
        assert!(matches!(
            roster.expel(bogus).unwrap_err(),
            RosterError::MissingStudent { .. }
        ));
    }

    #[test]
    fn reroll_only_produces_known_categories() {
        let mut roster = sample_roster();
        let mut rng = StdRng::seed_from_u64(7);

        roster.reroll_blood_statuses(&mut rng);

        for student in roster.active() {
            assert!(matches!(
                student.blood_status,
                BloodStatus::PureBlood | BloodStatus::HalfBlood | BloodStatus::MuggleBorn
            ));
        }
    }
}

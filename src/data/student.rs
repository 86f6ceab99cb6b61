use maud::Render;
use serde::Deserialize;
use uuid::Uuid;

/// One record of the remote student feed, exactly as served.
#[derive(Deserialize, Debug)]
pub struct RawStudent {
    pub fullname: String,
    pub gender: String,
    pub house: String,
}

/// Surname lists used to classify blood status.
#[derive(Deserialize, Debug, Default)]
pub struct BloodFamilies {
    pub pure: Vec<String>,
    pub half: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Gender {
    Witch,
    Wizard,
}

impl Gender {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Witch => "Witch",
            Self::Wizard => "Wizard",
        }
    }

    fn from_raw(raw: &str) -> Self {
        if raw.trim().eq_ignore_ascii_case("girl") {
            Self::Witch
        } else {
            Self::Wizard
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum House {
    Gryffindor,
    Hufflepuff,
    Ravenclaw,
    Slytherin,
    /// Whatever the feed sent, capitalized but otherwise untouched.
    Other(String),
}

impl House {
    pub fn from_raw(raw: &str) -> Self {
        let trimmed = raw.trim();
        match trimmed.to_lowercase().as_str() {
            "gryffindor" => Self::Gryffindor,
            "hufflepuff" => Self::Hufflepuff,
            "ravenclaw" => Self::Ravenclaw,
            "slytherin" => Self::Slytherin,
            _ => Self::Other(capitalize(trimmed)),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Gryffindor => "Gryffindor",
            Self::Hufflepuff => "Hufflepuff",
            Self::Ravenclaw => "Ravenclaw",
            Self::Slytherin => "Slytherin",
            Self::Other(name) => name,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BloodStatus {
    PureBlood,
    HalfBlood,
    MuggleBorn,
}

impl BloodStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PureBlood => "Pure blood",
            Self::HalfBlood => "Half blood",
            Self::MuggleBorn => "Muggle born",
        }
    }

    /// Default is muggle-born; the half list is checked after the pure
    /// list, so a surname present in both resolves to half blood.
    pub fn classify(surname: &str, families: &BloodFamilies) -> Self {
        let mut status = Self::MuggleBorn;
        if families.pure.iter().any(|name| name == surname) {
            status = Self::PureBlood;
        }
        if families.half.iter().any(|name| name == surname) {
            status = Self::HalfBlood;
        }
        status
    }
}

#[derive(Debug, Clone)]
pub struct Student {
    pub id: Uuid,
    pub first_name: String,
    pub middle_name: String,
    pub nick_name: String,
    pub last_name: String,
    pub gender: Gender,
    pub house: House,
    pub blood_status: BloodStatus,
    pub prefect: bool,
    pub inquisitorial: bool,
    pub image_file: String,
}

impl Student {
    /// Normalizes one raw feed record into a canonical student.
    pub fn prepare(raw: &RawStudent, families: &BloodFamilies) -> Self {
        let trimmed = raw.fullname.trim();
        let first_space = trimmed.find(' ');
        let last_space = trimmed.rfind(' ');

        let first_name = capitalize(match first_space {
            None => trimmed,
            Some(first) => &trimmed[..first],
        });

        // Everything strictly between the first and last space is either a
        // middle name or, when it leads with a quote, a nickname.
        let between = match (first_space, last_space) {
            (Some(first), Some(last)) if last > first => trimmed[first..last].trim(),
            _ => "",
        };
        let (middle_name, nick_name) = if between.starts_with('"') {
            (String::new(), capitalize_nickname(between))
        } else {
            (capitalize(between), String::new())
        };

        let last_name = match last_space {
            None => String::new(),
            Some(last) => capitalize_surname(&trimmed[last + 1..]),
        };

        let image_file = image_file(&first_name, &last_name);
        let blood_status = BloodStatus::classify(&last_name, families);

        Self {
            id: Uuid::new_v4(),
            first_name,
            middle_name,
            nick_name,
            last_name,
            gender: Gender::from_raw(&raw.gender),
            house: House::from_raw(&raw.house),
            blood_status,
            prefect: false,
            inquisitorial: false,
            image_file,
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Display string derived from the role flags at render time.
    pub fn responsibilities(&self) -> &'static str {
        match (self.prefect, self.inquisitorial) {
            (true, false) => "Prefect",
            (false, true) => "Inquisitorial squad member",
            (true, true) => "Prefect, Inquisitorial squad member",
            (false, false) => "",
        }
    }
}

impl Render for Student {
    fn render_to(&self, buffer: &mut String) {
        buffer.push_str(&self.last_name);
        buffer.push_str(", ");
        if let Some(initial) = self.first_name.chars().next() {
            buffer.push(initial);
        }
        buffer.push('.');
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
    }
}

/// Preserves the leading quote and capitalizes only the character after it.
fn capitalize_nickname(s: &str) -> String {
    let mut chars = s.chars();
    let Some(quote) = chars.next() else {
        return String::new();
    };
    let mut out = String::from(quote);
    if let Some(second) = chars.next() {
        out.extend(second.to_uppercase());
    }
    out.extend(chars.flat_map(char::to_lowercase));
    out
}

/// Each side of a hyphen is capitalized independently.
fn capitalize_surname(s: &str) -> String {
    match s.find('-') {
        Some(hyphen) => format!(
            "{}-{}",
            capitalize(&s[..hyphen]),
            capitalize(&s[hyphen + 1..])
        ),
        None => capitalize(s),
    }
}

/// Portrait filename: post-hyphen surname segment plus first-name initial.
fn image_file(first_name: &str, last_name: &str) -> String {
    let surname_part = match last_name.find('-') {
        Some(hyphen) => &last_name[hyphen + 1..],
        None => last_name,
    };
    let initial: String = first_name
        .chars()
        .next()
        .map(|c| c.to_lowercase().collect())
        .unwrap_or_default();
    format!("{}_{}.png", surname_part.to_lowercase(), initial)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(fullname: &str, gender: &str, house: &str) -> RawStudent {
        RawStudent {
            fullname: fullname.to_string(),
            gender: gender.to_string(),
            house: house.to_string(),
        }
    }

    #[test]
    fn prepares_the_canonical_example() {
        let student = Student::prepare(
            &raw("Hermione Jean Granger", "Girl", "gryffindor"),
            &BloodFamilies::default(),
        );

        assert_eq!(student.first_name, "Hermione");
        assert_eq!(student.middle_name, "Jean");
        assert_eq!(student.nick_name, "");
        assert_eq!(student.last_name, "Granger");
        assert_eq!(student.gender, Gender::Witch);
        assert_eq!(student.house, House::Gryffindor);
        assert_eq!(student.blood_status, BloodStatus::MuggleBorn);
        assert_eq!(student.image_file, "granger_h.png");
    }

    #[test]
    fn tolerates_padding_and_shouting() {
        let student = Student::prepare(
            &raw("  hermione   jean  GRANGER  ", "  GIRL ", " GRYFFINDOR "),
            &BloodFamilies::default(),
        );

        assert_eq!(student.first_name, "Hermione");
        assert_eq!(student.middle_name, "Jean");
        assert_eq!(student.last_name, "Granger");
        assert_eq!(student.gender, Gender::Witch);
        assert_eq!(student.house, House::Gryffindor);
    }

    #[test]
    fn quoted_middle_token_becomes_a_nickname() {
        let student = Student::prepare(
            &raw("Ron \"weasel\" Weasley", "Boy", "Gryffindor"),
            &BloodFamilies::default(),
        );

        assert_eq!(student.middle_name, "");
        assert_eq!(student.nick_name, "\"Weasel\"");
        assert!(student.nick_name.starts_with('"'));
        assert_eq!(student.first_name, "Ron");
        assert_eq!(student.last_name, "Weasley");
    }

    #[test]
    fn hyphenated_surname_capitalizes_both_sides() {
        let student = Student::prepare(
            &raw("Justin finch-fletchley", "Boy", "Hufflepuff"),
            &BloodFamilies::default(),
        );

        assert_eq!(student.last_name, "Finch-Fletchley");
        assert_eq!(student.image_file, "fletchley_j.png");
    }

    #[test]
    fn hyphenated_surname_recapitalizes_after_the_hyphen() {
        let student = Student::prepare(
            &raw("Leanne el-Gross", "Girl", "Hufflepuff"),
            &BloodFamilies::default(),
        );

        assert_eq!(student.last_name, "El-Gross");
        assert_eq!(student.image_file, "gross_l.png");
    }

    #[test]
    fn single_token_fullname_has_no_last_name() {
        let student = Student::prepare(&raw("Ernie", "Boy", "Hufflepuff"), &BloodFamilies::default());

        assert_eq!(student.first_name, "Ernie");
        assert_eq!(student.middle_name, "");
        assert_eq!(student.nick_name, "");
        assert_eq!(student.last_name, "");
    }

    #[test]
    fn empty_fullname_does_not_panic() {
        let student = Student::prepare(&raw("", "Boy", "Hufflepuff"), &BloodFamilies::default());

        assert_eq!(student.first_name, "");
        assert_eq!(student.last_name, "");
        assert_eq!(student.image_file, "_.png");
    }

    #[test]
    fn first_name_nonempty_for_nonempty_input() {
        for fullname in ["x", "x y", "x y z", "  padded  name  "] {
            let student =
                Student::prepare(&raw(fullname, "Boy", "Slytherin"), &BloodFamilies::default());
            assert!(
                !student.first_name.is_empty(),
                "no first name for {fullname:?}"
            );
        }
    }

    #[test]
    fn gender_maps_girl_and_boy() {
        let witch = Student::prepare(&raw("A B", "Girl", "Ravenclaw"), &BloodFamilies::default());
        let wizard = Student::prepare(&raw("A B", "Boy", "Ravenclaw"), &BloodFamilies::default());

        assert_eq!(witch.gender, Gender::Witch);
        assert_eq!(wizard.gender, Gender::Wizard);
    }

    #[test]
    fn unknown_house_is_preserved() {
        let student = Student::prepare(
            &raw("A B", "Boy", " beauxbatons "),
            &BloodFamilies::default(),
        );

        assert_eq!(student.house, House::Other("Beauxbatons".to_string()));
        assert_eq!(student.house.name(), "Beauxbatons");
    }

    #[test]
    fn blood_lookup_half_list_wins_ties() {
        let families = BloodFamilies {
            pure: vec!["Black".to_string(), "Malfoy".to_string()],
            half: vec!["Black".to_string()],
        };

        assert_eq!(
            BloodStatus::classify("Malfoy", &families),
            BloodStatus::PureBlood
        );
        assert_eq!(
            BloodStatus::classify("Black", &families),
            BloodStatus::HalfBlood
        );
        assert_eq!(
            BloodStatus::classify("Granger", &families),
            BloodStatus::MuggleBorn
        );
    }

    #[test]
    fn responsibilities_follow_the_flags() {
        let mut student =
            Student::prepare(&raw("A B", "Boy", "Slytherin"), &BloodFamilies::default());

        assert_eq!(student.responsibilities(), "");
        student.prefect = true;
        assert_eq!(student.responsibilities(), "Prefect");
        student.inquisitorial = true;
        assert_eq!(
            student.responsibilities(),
            "Prefect, Inquisitorial squad member"
        );
        student.prefect = false;
        assert_eq!(student.responsibilities(), "Inquisitorial squad member");
    }
}

use std::fmt;
use std::str::FromStr;

/// the six HEXACO dimensions measured by the bank.
///
/// `ALL` fixes the canonical enumeration order used anywhere traits are
/// rotated or listed (round-robin tie-break, scoring output, etc.).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
pub enum Trait {
    Extraversion,
    Agreeableness,
    Conscientiousness,
    Neuroticism,
    Openness,
    HonestyHumility,
}

impl Trait {
    pub const ALL: [Trait; 6] = [
        Trait::Extraversion,
        Trait::Agreeableness,
        Trait::Conscientiousness,
        Trait::Neuroticism,
        Trait::Openness,
        Trait::HonestyHumility,
    ];

    pub fn tag(&self) -> char {
        match self {
            Trait::Extraversion => 'E',
            Trait::Agreeableness => 'A',
            Trait::Conscientiousness => 'C',
            Trait::Neuroticism => 'N',
            Trait::Openness => 'O',
            Trait::HonestyHumility => 'H',
        }
    }
}

impl fmt::Display for Trait {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}

impl FromStr for Trait {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "E" | "e" => Ok(Trait::Extraversion),
            "A" | "a" => Ok(Trait::Agreeableness),
            "C" | "c" => Ok(Trait::Conscientiousness),
            "N" | "n" => Ok(Trait::Neuroticism),
            "O" | "o" => Ok(Trait::Openness),
            "H" | "h" => Ok(Trait::HonestyHumility),
            other => Err(format!("'{other}' is not one of the canonical six trait tags")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrips_through_tag() {
        for trait_tag in Trait::ALL {
            let parsed: Trait = trait_tag.tag().to_string().parse().unwrap();
            assert_eq!(parsed, trait_tag);
        }
    }

    #[test]
    fn rejects_unknown_tag() {
        assert!("X".parse::<Trait>().is_err());
    }
}

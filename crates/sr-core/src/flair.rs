//! Post flair, stored as a `[Label] ` prefix on the title.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Flair {
    DdAnalysis,
    RegulatoryNews,
    DividendInfo,
    TaxQuestion,
    #[default]
    General,
}

impl Flair {
    pub const ALL: [Flair; 5] = [
        Flair::DdAnalysis,
        Flair::RegulatoryNews,
        Flair::DividendInfo,
        Flair::TaxQuestion,
        Flair::General,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Flair::DdAnalysis => "DD/Analysis",
            Flair::RegulatoryNews => "Regulatory News",
            Flair::DividendInfo => "Dividend Info",
            Flair::TaxQuestion => "Tax Question",
            Flair::General => "General",
        }
    }

    pub fn from_label(label: &str) -> Option<Flair> {
        Flair::ALL.into_iter().find(|f| f.label() == label)
    }
}

/// Prepends the flair to a title. General posts carry no prefix.
pub fn encode_title(flair: Flair, title: &str) -> String {
    match flair {
        Flair::General => title.to_string(),
        other => format!("[{}] {}", other.label(), title),
    }
}

/// Splits a stored title into its flair and the title shown to readers.
/// An unknown or `[General]` bracket is left in the title.
pub fn parse_title(title: &str) -> (Option<Flair>, &str) {
    let parsed = title.strip_prefix('[').and_then(|rest| {
        let (label, tail) = rest.split_once(']')?;
        match Flair::from_label(label)? {
            Flair::General => None,
            flair => Some((flair, tail.trim_start())),
        }
    });

    match parsed {
        Some((flair, clean)) => (Some(flair), clean),
        None => (None, title),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn general_has_no_prefix() {
        assert_eq!(encode_title(Flair::General, "Hello"), "Hello");
        assert_eq!(parse_title("Hello"), (None, "Hello"));
    }

    #[test]
    fn prefix_survives_a_round_trip() {
        let stored = encode_title(Flair::DdAnalysis, "Samsung Q4 preview");
        assert_eq!(stored, "[DD/Analysis] Samsung Q4 preview");
        assert_eq!(
            parse_title(&stored),
            (Some(Flair::DdAnalysis), "Samsung Q4 preview")
        );
    }

    #[test]
    fn unknown_brackets_stay_in_the_title() {
        assert_eq!(parse_title("[Meme] lol"), (None, "[Meme] lol"));
        assert_eq!(parse_title("[General] hi"), (None, "[General] hi"));
    }
}

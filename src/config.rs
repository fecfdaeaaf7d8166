use std::fs;
use std::path::Path;

use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};

use crate::error::{Result, RosterError};

/// Settings for pool parsing, slot classification and ledger writes.
///
/// Every field has a default matching the pool sheets and agendas the
/// roster is generated from, so an empty TOML file is a valid config.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RosterConfig {
    /// Header of the column holding candidate names
    pub anchor_column: String,
    /// chrono format of last-served dates in the pool sheet
    pub date_format: String,
    /// Year assumed when resolving meeting labels into ledger dates
    pub ledger_year: i32,
    /// Demonstration slots reserved for men before discourses are counted
    pub male_demonstration_quota: usize,
    pub roles: RoleNames,
    pub keywords: SlotKeywords,
}

impl Default for RosterConfig {
    fn default() -> Self {
        Self {
            anchor_column: "Publicadores".to_string(),
            date_format: "%d/%m/%Y".to_string(),
            ledger_year: 2025,
            male_demonstration_quota: 1,
            roles: RoleNames::default(),
            keywords: SlotKeywords::default(),
        }
    }
}

impl RosterConfig {
    /// Loads a config from a TOML file.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        config.validate()?;
        tracing::debug!("Loaded roster config from {}", path.display());
        Ok(config)
    }

    /// Rejects values that parse but would break pool reading or ledger writes.
    pub fn validate(&self) -> Result<()> {
        let has_bad_specifier =
            StrftimeItems::new(&self.date_format).any(|item| matches!(item, Item::Error));
        if self.date_format.trim().is_empty() || has_bad_specifier {
            return Err(RosterError::InvalidConfig(format!(
                "date_format '{}' is not a valid chrono format",
                self.date_format
            )));
        }
        Ok(())
    }

    /// Loads the config at `path` when given, defaults otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from_file(path),
            None => Ok(Self::default()),
        }
    }
}

/// Role column names as they appear in the pool sheet header.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RoleNames {
    pub chairman: String,
    pub counselor: String,
    pub opening_prayer: String,
    pub closing_prayer: String,
    pub reader_a: String,
    pub reader_b: String,
    pub treasures_discourse: String,
    pub spiritual_gems: String,
    pub ministry_discourse: String,
    pub christian_discourse: String,
    pub study_leader: String,
    pub study_reader: String,
    pub demonstrations: DemonstrationRoles,
}

impl Default for RoleNames {
    fn default() -> Self {
        Self {
            chairman: "Presidente".to_string(),
            counselor: "Conselheiro Sala B".to_string(),
            opening_prayer: "Oração".to_string(),
            closing_prayer: "OraçãoFinal".to_string(),
            reader_a: "Leitor - Leitura da Bíblia - A".to_string(),
            reader_b: "Leitor - Leitura da Bíblia - B".to_string(),
            treasures_discourse: "Discurso - Tesouros da Palavra de Deus".to_string(),
            spiritual_gems: "Joías Espirituais - Tesouros da Palavra de Deus".to_string(),
            ministry_discourse: "Discursos -  Faça Seu Melhor no Ministério".to_string(),
            christian_discourse: "Discursos - Nossa Vida Cristã".to_string(),
            study_leader: "Estudo Bíblico - Nossa Vida Cristã".to_string(),
            study_reader: "Leitor - Estudo Biblíco".to_string(),
            demonstrations: DemonstrationRoles::default(),
        }
    }
}

/// Holder and helper roles for one demonstration room.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PairRoles {
    pub holder: String,
    pub helper: String,
}

impl PairRoles {
    fn new(holder: &str, helper: &str) -> Self {
        Self {
            holder: holder.to_string(),
            helper: helper.to_string(),
        }
    }
}

/// Demonstration roles, split by room (A/B) and by gender segment.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DemonstrationRoles {
    pub female_a: PairRoles,
    pub female_b: PairRoles,
    pub male_a: PairRoles,
    pub male_b: PairRoles,
}

impl Default for DemonstrationRoles {
    fn default() -> Self {
        Self {
            female_a: PairRoles::new("Titular - A (Mulher)", "Ajudante - A (Mulher)"),
            female_b: PairRoles::new("Titular - B (Mulher)", "Ajudante - B (Mulher)"),
            male_a: PairRoles::new("Titular - A (Homem)", "Ajudante - A (Homem)"),
            male_b: PairRoles::new("Titular - B (Homem)", "Ajudante - B (Homem)"),
        }
    }
}

/// Lowercase substrings used to classify agenda slot texts.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SlotKeywords {
    pub bible_reading: String,
    pub spiritual_gems: String,
    pub ministry_discourse: String,
    pub congregation_study: String,
}

impl Default for SlotKeywords {
    fn default() -> Self {
        Self {
            bible_reading: "leitura da bíblia".to_string(),
            spiritual_gems: "joias espirituais".to_string(),
            ministry_discourse: "discurso".to_string(),
            congregation_study: "estudo bíblico de congregação".to_string(),
        }
    }
}

/// Case-insensitive substring test used by every section planner.
pub fn text_matches(text: &str, keyword: &str) -> bool {
    !keyword.is_empty() && text.to_lowercase().contains(&keyword.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_empty_toml_yields_defaults() {
        let config: RosterConfig = toml::from_str("").unwrap();
        assert_eq!(config.anchor_column, "Publicadores");
        assert_eq!(config.ledger_year, 2025);
        assert_eq!(config.male_demonstration_quota, 1);
        assert_eq!(config.roles.chairman, "Presidente");
    }

    #[test]
    fn test_partial_override_keeps_other_defaults() {
        let config: RosterConfig = toml::from_str(
            r#"
ledger_year = 2026

[roles]
chairman = "Chairman"

[roles.demonstrations.male_a]
holder = "Student A"
helper = "Assistant A"
"#,
        )
        .unwrap();
        assert_eq!(config.ledger_year, 2026);
        assert_eq!(config.roles.chairman, "Chairman");
        assert_eq!(config.roles.counselor, "Conselheiro Sala B");
        assert_eq!(config.roles.demonstrations.male_a.holder, "Student A");
        assert_eq!(
            config.roles.demonstrations.female_a.holder,
            "Titular - A (Mulher)"
        );
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "anchor_column = \"Publishers\"").unwrap();
        let config = RosterConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.anchor_column, "Publishers");
    }

    #[test]
    fn test_load_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("roster.toml");
        assert!(RosterConfig::load(Some(&missing)).is_err());
    }

    #[test]
    fn test_bad_date_format_is_rejected_on_load() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "date_format = \"%d/%Q\"").unwrap();
        let err = RosterConfig::load(Some(file.path())).unwrap_err();
        assert!(matches!(err, RosterError::InvalidConfig(_)));
    }

    #[test]
    fn test_validate_date_format() {
        let mut config = RosterConfig::default();
        assert!(config.validate().is_ok());
        config.date_format = "%Y-%m-%d".to_string();
        assert!(config.validate().is_ok());
        config.date_format = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_text_matches_ignores_case() {
        assert!(text_matches("3. LEITURA DA BÍBLIA (4 min)", "leitura da bíblia"));
        assert!(!text_matches("1. Discurso (10 min)", "joias espirituais"));
        assert!(!text_matches("anything", ""));
    }
}

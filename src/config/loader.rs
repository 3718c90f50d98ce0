//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading payroll
//! configuration from YAML files.

use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};

use super::types::{EmployeeSeed, EmployeesConfig, PayrollConfig, PayrollRules};

/// Loads and provides access to payroll configuration.
///
/// # Directory Structure
///
/// ```text
/// config/
/// ├── payroll.yaml    # Payroll rules (required)
/// └── employees.yaml  # Seed salary structures and attendance (optional)
/// ```
///
/// # Example
///
/// ```no_run
/// use payroll_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config").unwrap();
/// println!("Proration base: {} days", loader.rules().proration_base_days);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: PayrollConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - `payroll.yaml` is missing (`ConfigNotFound`)
    /// - Any file contains invalid YAML or invalid rule values (`ConfigParseError`)
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let rules_path = path.join("payroll.yaml");
        let rules = Self::load_yaml::<PayrollRules>(&rules_path)?;
        rules
            .validate()
            .map_err(|e| EngineError::ConfigParseError {
                path: rules_path.display().to_string(),
                message: e.to_string(),
            })?;

        let employees_path = path.join("employees.yaml");
        let employees = if employees_path.exists() {
            Self::load_yaml::<EmployeesConfig>(&employees_path)?.employees
        } else {
            Vec::new()
        };

        tracing::debug!(
            path = %path.display(),
            employees = employees.len(),
            "Loaded payroll configuration"
        );

        Ok(Self {
            config: PayrollConfig::new(rules, employees),
        })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the underlying payroll configuration.
    pub fn config(&self) -> &PayrollConfig {
        &self.config
    }

    /// Returns the payroll rules.
    pub fn rules(&self) -> &PayrollRules {
        self.config.rules()
    }

    /// Returns the seeded employees.
    pub fn employees(&self) -> &[EmployeeSeed] {
        self.config.employees()
    }

    /// Gets a seeded employee by id.
    pub fn get_employee(&self, employee_id: &str) -> EngineResult<&EmployeeSeed> {
        self.config
            .employees()
            .iter()
            .find(|e| e.id == employee_id)
            .ok_or_else(|| EngineError::EmployeeNotFound {
                employee_id: employee_id.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{UnmarkedDayPolicy, WorkingDaysPolicy};
    use rust_decimal::Decimal;
    use std::path::PathBuf;

    fn config_path() -> &'static str {
        "./config"
    }

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "payroll_engine_{}_{}",
            name,
            uuid::Uuid::new_v4()
        ));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_load_valid_configuration() {
        let result = ConfigLoader::load(config_path());
        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());

        let loader = result.unwrap();
        assert_eq!(loader.rules().proration_base_days, Decimal::from(30));
        assert_eq!(loader.rules().working_days, WorkingDaysPolicy::Calendar);
        assert_eq!(loader.rules().unmarked_days, UnmarkedDayPolicy::Absent);
    }

    #[test]
    fn test_seeded_employees_are_loaded() {
        let loader = ConfigLoader::load(config_path()).unwrap();

        let employee = loader.get_employee("emp_001").unwrap();
        assert_eq!(employee.salary_structure.basic, Decimal::from(20000));
        assert!(!employee.attendance.is_empty());
    }

    #[test]
    fn test_get_employee_unknown_returns_error() {
        let loader = ConfigLoader::load(config_path()).unwrap();

        match loader.get_employee("unknown") {
            Err(EngineError::EmployeeNotFound { employee_id }) => {
                assert_eq!(employee_id, "unknown");
            }
            other => panic!("Expected EmployeeNotFound error, got {:?}", other),
        }
    }

    #[test]
    fn test_load_missing_directory_returns_error() {
        let result = ConfigLoader::load("/nonexistent/path");

        match result {
            Err(EngineError::ConfigNotFound { path }) => {
                assert!(path.contains("payroll.yaml"));
            }
            _ => panic!("Expected ConfigNotFound error"),
        }
    }

    #[test]
    fn test_employees_file_is_optional() {
        let dir = scratch_dir("rules_only");
        fs::write(dir.join("payroll.yaml"), "proration_base_days: 26\n").unwrap();

        let loader = ConfigLoader::load(&dir).unwrap();
        assert_eq!(loader.rules().proration_base_days, Decimal::from(26));
        assert!(loader.employees().is_empty());

        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_invalid_yaml_returns_parse_error() {
        let dir = scratch_dir("bad_yaml");
        fs::write(dir.join("payroll.yaml"), "proration_base_days: [not a number\n").unwrap();

        match ConfigLoader::load(&dir) {
            Err(EngineError::ConfigParseError { path, .. }) => {
                assert!(path.contains("payroll.yaml"));
            }
            other => panic!("Expected ConfigParseError, got {:?}", other),
        }

        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_invalid_rule_values_return_parse_error() {
        let dir = scratch_dir("bad_rules");
        fs::write(dir.join("payroll.yaml"), "standard_workday_hours: 0\n").unwrap();

        match ConfigLoader::load(&dir) {
            Err(EngineError::ConfigParseError { message, .. }) => {
                assert!(message.contains("standard_workday_hours"));
            }
            other => panic!("Expected ConfigParseError, got {:?}", other),
        }

        fs::remove_dir_all(dir).unwrap();
    }
}

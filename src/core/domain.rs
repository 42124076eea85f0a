// Identifiable defines common traits that can be shared by catalog records
pub trait Identifiable {
    fn id(&self) -> i64;
}


// Configuration abstracts config options for library system
#[derive(Debug, PartialEq, Clone)]
pub struct Configuration {
    pub branch_id: String,
    // reject a return whose book is not flagged as issued instead of warning
    pub reject_inconsistent_returns: bool,
}

impl Configuration {
    pub fn new(branch_id: &str) -> Self {
        Configuration {
            branch_id: branch_id.to_string(),
            reject_inconsistent_returns: false,
        }
    }

    pub fn with_strict_returns(mut self, strict: bool) -> Self {
        self.reject_inconsistent_returns = strict;
        self
    }
}

#[cfg(test)]
mod tests {
    use crate::core::domain::Configuration;

    #[test]
    fn test_should_build_config() {
        let config = Configuration::new("test");
        assert_eq!("test", config.branch_id.as_str());
        assert!(!config.reject_inconsistent_returns);
    }

    #[test]
    fn test_should_build_strict_config() {
        let config = Configuration::new("test").with_strict_returns(true);
        assert!(config.reject_inconsistent_returns);
    }
}

/// A farm a crop is grown on
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Farm {
    name: String,
    location: String,
}

impl Farm {
    pub fn new(name: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            location: location.into(),
        }
    }

    /// Placeholder farm for crops entered without farm details
    pub fn unknown() -> Self {
        Self::new("unknown", "unknown")
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn set_location(&mut self, location: impl Into<String>) {
        self.location = location.into();
    }
}

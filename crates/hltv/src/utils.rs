use serde::Deserialize;

// Caller-supplied value parameters for the list operations. days and stars
// are accepted for interface compatibility; extraction returns everything
// the page shows and any time/tier filtering stays a caller concern.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListQuery {
    pub limit: Option<usize>,
    pub days: Option<u32>,
    pub stars: Option<u32>,
}

impl ListQuery {
    pub fn validate(self) -> Result<Self, String> {
        if self.limit.is_some_and(|l| l == 0) {
            return Err("Limit must be greater than 0".to_string());
        }
        if self.days.is_some_and(|d| d == 0) {
            return Err("Days must be greater than 0".to_string());
        }
        if self.stars.is_some_and(|s| s > 5) {
            return Err("Stars must be between 0 and 5".to_string());
        }
        Ok(self)
    }

    pub fn apply<T>(&self, mut items: Vec<T>) -> Vec<T> {
        if let Some(limit) = self.limit {
            items.truncate(limit);
        }
        items
    }
}

use serde::{Deserialize, Serialize};
use validator::Validate;

// Request para crear una valoración; el routeId viene del path
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct CreateReviewRequest {
    #[validate(range(min = 1, max = 5))]
    pub rating: i32,

    #[validate(length(max = 1000))]
    pub comment: Option<String>,
}

impl CreateReviewRequest {
    /// Comentario normalizado: vacío u omitido se guarda como null
    pub fn normalized_comment(&self) -> Option<String> {
        self.comment
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(str::to_string)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_comment_becomes_none() {
        let req = CreateReviewRequest { rating: 4, comment: Some("  ".into()) };
        assert_eq!(req.normalized_comment(), None);
        let req = CreateReviewRequest { rating: 4, comment: Some("Well lit".into()) };
        assert_eq!(req.normalized_comment().as_deref(), Some("Well lit"));
    }

    #[test]
    fn rating_out_of_range_fails() {
        let req = CreateReviewRequest { rating: 9, comment: None };
        assert!(req.validate().unwrap_err().field_errors().contains_key("rating"));
    }
}

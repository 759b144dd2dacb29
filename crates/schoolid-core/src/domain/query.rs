use crate::error::CoreError;
use crate::rules::{is_valid_student_number, normalize, normalize_student_number};
use serde::{Deserialize, Serialize};

/// A validated lookup request. Both fields are normalized on construction;
/// the student number is guaranteed to be 3 to 10 ASCII digits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupQuery {
    pub student_number: String,
    pub name: String,
}

impl LookupQuery {
    pub fn new(raw_student_number: &str, raw_name: &str) -> Result<Self, CoreError> {
        let student_number = normalize_student_number(raw_student_number);
        if student_number.is_empty() {
            return Err(CoreError::EmptyStudentNumber);
        }
        if !is_valid_student_number(&student_number) {
            return Err(CoreError::InvalidStudentNumber);
        }
        let name = normalize(raw_name);
        if name.is_empty() {
            return Err(CoreError::EmptyName);
        }
        Ok(Self {
            student_number,
            name,
        })
    }

    /// Key used by the local table strategy.
    pub fn table_key(&self) -> String {
        format!("{}|{}", self.student_number, self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::LookupQuery;
    use crate::error::CoreError;

    #[test]
    fn builds_normalized_query() {
        let query = LookupQuery::new(" 203 01 ", "  홍  길동 ").expect("query");
        assert_eq!(query.student_number, "20301");
        assert_eq!(query.name, "홍 길동");
        assert_eq!(query.table_key(), "20301|홍 길동");
    }

    #[test]
    fn rejects_empty_student_number() {
        assert_eq!(
            LookupQuery::new("   ", "홍길동"),
            Err(CoreError::EmptyStudentNumber)
        );
    }

    #[test]
    fn rejects_non_digit_student_number() {
        assert_eq!(
            LookupQuery::new("abc12", "홍길동"),
            Err(CoreError::InvalidStudentNumber)
        );
    }

    #[test]
    fn rejects_empty_name() {
        assert_eq!(LookupQuery::new("20301", "  "), Err(CoreError::EmptyName));
    }
}

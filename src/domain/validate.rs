use crate::error::FieldError;

/// Pushes a complaint when a required field is empty.
pub(crate) fn require(errors: &mut Vec<FieldError>, field: &str, value: &str) {
    if value.trim().is_empty() {
        errors.push(FieldError::new(field, "is required"));
    }
}

pub(crate) fn require_email(errors: &mut Vec<FieldError>, field: &str, value: &str) {
    require(errors, field, value);
    if !value.is_empty() && !value.contains('@') {
        errors.push(FieldError::new(field, "must be a valid email address"));
    }
}

pub(crate) fn require_state_code(errors: &mut Vec<FieldError>, field: &str, value: &str) {
    require(errors, field, value);
    if !value.is_empty() && (value.len() != 2 || value.chars().any(|c| !c.is_ascii_uppercase())) {
        errors.push(FieldError::new(
            field,
            "must be a two-letter uppercase state code",
        ));
    }
}

pub(crate) fn max_len(errors: &mut Vec<FieldError>, field: &str, value: &str, max: usize) {
    if value.len() > max {
        errors.push(FieldError::new(
            field,
            format!("must be at most {max} characters"),
        ));
    }
}

/// All-zero SSNs are a known placeholder submitted by fraudulent or
/// templated signups; the processor rejects them late, we reject them early.
pub(crate) fn ssn_is_placeholder(ssn: &str) -> bool {
    let digits: Vec<char> = ssn.chars().filter(|c| c.is_ascii_digit()).collect();
    !digits.is_empty() && digits.iter().all(|c| *c == '0')
}

pub(crate) fn require_ssn(errors: &mut Vec<FieldError>, field: &str, value: &str) {
    require(errors, field, value);
    if ssn_is_placeholder(value) {
        errors.push(FieldError::new(field, "placeholder value is not accepted"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_ssn_detection() {
        assert!(ssn_is_placeholder("0000"));
        assert!(ssn_is_placeholder("000-00-0000"));
        assert!(!ssn_is_placeholder("123-45-6789"));
        assert!(!ssn_is_placeholder("000-00-0001"));
        assert!(!ssn_is_placeholder(""));
    }

    #[test]
    fn test_state_code() {
        let mut errors = Vec::new();
        require_state_code(&mut errors, "state", "CA");
        assert!(errors.is_empty());

        require_state_code(&mut errors, "state", "cal");
        assert_eq!(errors.len(), 1);
    }
}

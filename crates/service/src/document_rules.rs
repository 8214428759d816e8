//! Per-document-type identifier format rules. The rule is keyed on the
//! resolved DocumentType name, upper-cased; unknown types carry no
//! format constraint.

fn digits_only(value: &str) -> bool {
    !value.is_empty() && value.chars().all(|c| c.is_ascii_digit())
}

fn alphanumeric_only(value: &str) -> bool {
    !value.is_empty() && value.chars().all(|c| c.is_ascii_alphanumeric())
}

pub fn validate_document_number(doc_type_name: &str, value: &str) -> Result<(), String> {
    let name = doc_type_name.to_uppercase();

    if name == "DNI" {
        if !digits_only(value) {
            return Err("DNI must contain only digits".into());
        }
        if !(8..=9).contains(&value.len()) {
            return Err("DNI must have between 8 and 9 digits".into());
        }
    } else if name == "CE" || name.contains("CARNE DE EXTRANJERIA") {
        if !digits_only(value) {
            return Err("foreigner card must contain only digits".into());
        }
        if value.len() > 12 {
            return Err("foreigner card must have at most 12 digits".into());
        }
    } else if name == "PTP" {
        if !digits_only(value) {
            return Err("PTP must contain only digits".into());
        }
        if value.len() != 9 {
            return Err("PTP must have exactly 9 digits".into());
        }
    } else if name == "CR" || name.contains("CARNE DE REFUGIADO") {
        if !alphanumeric_only(value) {
            return Err("refugee card must contain only letters and digits".into());
        }
    } else if name == "PAS" || name.contains("PASAPORTE") {
        if !alphanumeric_only(value) {
            return Err("passport must contain only letters and digits".into());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::validate_document_number;

    #[test]
    fn dni_length_bounds() {
        assert!(validate_document_number("DNI", "1234567").is_err());
        assert!(validate_document_number("DNI", "12345678").is_ok());
        assert!(validate_document_number("DNI", "123456789").is_ok());
        assert!(validate_document_number("DNI", "1234567890").is_err());
    }

    #[test]
    fn dni_rejects_non_digits() {
        assert!(validate_document_number("DNI", "1234567a").is_err());
        assert!(validate_document_number("dni", "1234567a").is_err());
    }

    #[test]
    fn ce_max_twelve_digits() {
        assert!(validate_document_number("CE", "123456789012").is_ok());
        assert!(validate_document_number("CE", "1234567890123").is_err());
        assert!(validate_document_number("Carne de Extranjeria", "12ab").is_err());
    }

    #[test]
    fn ptp_exactly_nine_digits() {
        assert!(validate_document_number("PTP", "123456789").is_ok());
        assert!(validate_document_number("PTP", "12345678").is_err());
        assert!(validate_document_number("PTP", "1234567890").is_err());
    }

    #[test]
    fn cr_and_pas_alphanumeric() {
        assert!(validate_document_number("CR", "AB12345").is_ok());
        assert!(validate_document_number("CR", "AB-12345").is_err());
        assert!(validate_document_number("PAS", "X9123456").is_ok());
        assert!(validate_document_number("Pasaporte", "X9 123456").is_err());
    }

    #[test]
    fn unknown_type_is_unconstrained() {
        assert!(validate_document_number("LICENCIA", "whatever-123").is_ok());
    }
}

//! Form input validation shared by the pages.

use microflix_api_models::{LoginRequest, RatingValue, RegisterRequest};

/// Parse a rating field. The error is the message to show.
///
/// # Errors
///
/// Returns the user-facing message when the input is not a number between
/// 1.0 and 10.0.
pub fn parse_rating_input(input: &str) -> Result<RatingValue, String> {
    input.parse::<RatingValue>().map_err(|err| err.to_string())
}

/// Text put back into the rating field for a stored score.
#[must_use]
pub fn format_rating_input(rate: f64) -> String {
    format!("{rate:.1}")
}

/// Raw values of the sign-in form.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LoginForm {
    /// Email field.
    pub email: String,
    /// Password field.
    pub password: String,
}

impl LoginForm {
    /// Build the request body.
    ///
    /// # Errors
    ///
    /// Returns the user-facing message for the first invalid field.
    pub fn validate(&self) -> Result<LoginRequest, String> {
        Ok(LoginRequest {
            email: valid_email(&self.email)?,
            password: required_password(&self.password)?,
        })
    }
}

/// Raw values of the registration form.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RegisterForm {
    /// Public display name field.
    pub display_name: String,
    /// Email field.
    pub email: String,
    /// Password field.
    pub password: String,
}

impl RegisterForm {
    /// Build the request body.
    ///
    /// # Errors
    ///
    /// Returns the user-facing message for the first invalid field.
    pub fn validate(&self) -> Result<RegisterRequest, String> {
        let display_name = self.display_name.trim();
        if display_name.is_empty() {
            return Err("Please choose a display name.".to_string());
        }
        Ok(RegisterRequest {
            email: valid_email(&self.email)?,
            password: required_password(&self.password)?,
            display_name: display_name.to_string(),
        })
    }
}

fn valid_email(raw: &str) -> Result<String, String> {
    let email = raw.trim();
    if email.is_empty() || !email.contains('@') {
        return Err("Please enter a valid email address.".to_string());
    }
    Ok(email.to_string())
}

// Passwords are sent as typed; surrounding spaces are significant.
fn required_password(raw: &str) -> Result<String, String> {
    if raw.is_empty() {
        return Err("Please enter your password.".to_string());
    }
    Ok(raw.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rating_input_messages() {
        assert_eq!(
            parse_rating_input("abc"),
            Err("Please enter a number between 1.0 and 10.0.".to_string())
        );
        assert_eq!(
            parse_rating_input("0.5"),
            Err("Rating must be between 1.0 and 10.0.".to_string())
        );
        let value = parse_rating_input(" 7.5 ").expect("valid rating");
        assert!((value.get() - 7.5).abs() < f64::EPSILON);
    }

    #[test]
    fn stored_rating_is_shown_with_one_decimal() {
        assert_eq!(format_rating_input(8.0), "8.0");
        assert_eq!(format_rating_input(6.26), "6.3");
    }

    #[test]
    fn login_form_trims_email_but_not_password() {
        let form = LoginForm {
            email: "  ana@example.com ".into(),
            password: " secret ".into(),
        };
        let request = form.validate().expect("valid form");
        assert_eq!(request.email, "ana@example.com");
        assert_eq!(request.password, " secret ");

        let missing = LoginForm {
            email: "ana@example.com".into(),
            password: String::new(),
        };
        assert!(missing.validate().is_err());
        assert!(LoginForm::default().validate().is_err());
    }

    #[test]
    fn register_form_requires_display_name_first() {
        let form = RegisterForm {
            display_name: "  ".into(),
            email: "bad".into(),
            password: String::new(),
        };
        assert_eq!(
            form.validate(),
            Err("Please choose a display name.".to_string())
        );

        let form = RegisterForm {
            display_name: " Ana ".into(),
            email: "bad".into(),
            password: "pw".into(),
        };
        assert_eq!(
            form.validate(),
            Err("Please enter a valid email address.".to_string())
        );

        let request = RegisterForm {
            display_name: " Ana ".into(),
            email: "ana@example.com".into(),
            password: "pw".into(),
        }
        .validate()
        .expect("valid form");
        assert_eq!(request.display_name, "Ana");
        assert_eq!(request.email, "ana@example.com");
    }
}

//! # Registration Flow
//!
//! Account creation after a new number has been verified.
//!
//! ## Form Rules
//! - First and last name required
//! - Email optional
//! - Password: 6+ characters with upper, lower and a digit
//! - Confirmation must match
//! - Date of birth required, not in the future
//! - Privacy, terms and age agreements all ticked

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::info;
use zamda_core::validation::{
    compose_full_phone, validate_date_of_birth, validate_name, validate_password,
    PasswordCriteria,
};
use zamda_core::{User, ValidationError};

use crate::error::ApiError;
use crate::navigation::{Navigator, Route};
use crate::state::StoreHandle;

const GOOGLE_FIRST_NAME: &str = "Google";
const GOOGLE_LAST_NAME: &str = "User";
const GOOGLE_EMAIL: &str = "user@gmail.com";

/// Text fields as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistrationForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    /// `YYYY-MM-DD`
    pub date_of_birth: String,
}

/// The three consent checkboxes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Agreements {
    pub privacy: bool,
    pub terms: bool,
    pub age: bool,
}

impl Agreements {
    pub fn all() -> Self {
        Agreements {
            privacy: true,
            terms: true,
            age: true,
        }
    }

    pub fn all_checked(&self) -> bool {
        self.privacy && self.terms && self.age
    }

    fn check(&self) -> Result<(), ValidationError> {
        let missing = [
            ("privacy policy", self.privacy),
            ("terms of service", self.terms),
            ("age confirmation", self.age),
        ]
        .into_iter()
        .find(|(_, ticked)| !ticked);

        match missing {
            Some((field, _)) => Err(ValidationError::NotAccepted {
                field: field.to_string(),
            }),
            None => Ok(()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct RegisterFlow {
    store: StoreHandle,
    navigator: Arc<Navigator>,
    pub form: RegistrationForm,
    pub agreements: Agreements,
}

impl RegisterFlow {
    pub fn new(store: StoreHandle, navigator: Arc<Navigator>) -> Self {
        RegisterFlow {
            store,
            navigator,
            form: RegistrationForm::default(),
            agreements: Agreements::default(),
        }
    }

    /// Live checklist under the password field.
    pub fn password_criteria(&self) -> PasswordCriteria {
        PasswordCriteria::evaluate(&self.form.password)
    }

    /// Whether "Create Account" is enabled.
    pub fn is_valid(&self, today: NaiveDate) -> bool {
        self.check(today).is_ok()
    }

    fn check(&self, today: NaiveDate) -> Result<NaiveDate, ValidationError> {
        validate_name("first name", &self.form.first_name)?;
        validate_name("last name", &self.form.last_name)?;
        validate_password(&self.form.password)?;
        if self.form.password != self.form.confirm_password {
            return Err(ValidationError::Mismatch {
                field: "confirm password".to_string(),
                other: "password".to_string(),
            });
        }
        let dob = validate_date_of_birth(&self.form.date_of_birth, today)?;
        self.agreements.check()?;
        Ok(dob)
    }

    fn full_phone(&self) -> Result<String, ApiError> {
        let store = self.store.get()?;
        Ok(store.with_state(|s| compose_full_phone(s.selected_country, &s.phone_number)))
    }

    /// Creates the account, signs in and opens the dashboard.
    ///
    /// `today` bounds the date of birth; callers pass the local date.
    pub fn submit(&self, today: NaiveDate) -> Result<Route, ApiError> {
        let dob = self.check(today)?;

        let email = self.form.email.trim();
        let mut user = User::new(
            self.form.first_name.trim(),
            self.form.last_name.trim(),
            self.full_phone()?,
        );
        user.email = (!email.is_empty()).then(|| email.to_string());
        user.date_of_birth = Some(dob);

        self.finish(user)
    }

    /// Demo Google sign-up. Only the agreements are required.
    pub fn google_sign_up(&self) -> Result<Route, ApiError> {
        self.agreements.check()?;

        let mut user = User::new(GOOGLE_FIRST_NAME, GOOGLE_LAST_NAME, self.full_phone()?);
        user.email = Some(GOOGLE_EMAIL.to_string());

        self.finish(user)
    }

    fn finish(&self, user: User) -> Result<Route, ApiError> {
        self.store.get()?.sign_in(user);
        info!("Account created");

        self.navigator.navigate(Route::Dashboard);
        Ok(Route::Dashboard)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::state::AppStore;
    use zamda_core::AuthStage;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    fn setup() -> (Arc<AppStore>, Arc<Navigator>, RegisterFlow) {
        let store = Arc::new(AppStore::new());
        store.set_phone_number("8012345678");
        store.begin_verification();
        let navigator = Arc::new(Navigator::new(Route::Register));
        let flow = RegisterFlow::new(store.handle(), navigator.clone());
        (store, navigator, flow)
    }

    fn fill(flow: &mut RegisterFlow) {
        flow.form = RegistrationForm {
            first_name: "Ada".to_string(),
            last_name: "Obi".to_string(),
            email: String::new(),
            password: "Secret1".to_string(),
            confirm_password: "Secret1".to_string(),
            date_of_birth: "1990-05-17".to_string(),
        };
        flow.agreements = Agreements::all();
    }

    #[test]
    fn test_submit_creates_user() {
        let (store, navigator, mut flow) = setup();
        fill(&mut flow);
        assert!(flow.is_valid(today()));

        assert_eq!(flow.submit(today()).unwrap(), Route::Dashboard);

        let user = store.user().unwrap();
        assert_eq!(user.phone, "+2348012345678");
        assert_eq!(user.email, None);
        assert_eq!(user.date_of_birth, NaiveDate::from_ymd_opt(1990, 5, 17));
        assert_eq!(store.auth_stage(), AuthStage::Authenticated);
        assert_eq!(navigator.current(), Route::Dashboard);
    }

    #[test]
    fn test_email_kept_when_given() {
        let (store, _, mut flow) = setup();
        fill(&mut flow);
        flow.form.email = "ada@example.com".to_string();

        flow.submit(today()).unwrap();

        assert_eq!(store.user().unwrap().email.as_deref(), Some("ada@example.com"));
    }

    #[test]
    fn test_invalid_forms() {
        let (store, _, mut flow) = setup();

        fill(&mut flow);
        flow.form.confirm_password = "Secret2".to_string();
        assert!(!flow.is_valid(today()));

        fill(&mut flow);
        flow.form.password = "secret1".to_string();
        flow.form.confirm_password = "secret1".to_string();
        assert!(!flow.password_criteria().uppercase);
        assert!(!flow.is_valid(today()));

        fill(&mut flow);
        flow.agreements.age = false;
        let err = flow.submit(today()).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        fill(&mut flow);
        flow.form.date_of_birth = "2030-01-01".to_string();
        assert!(flow.submit(today()).is_err());

        assert!(store.user().is_none());
        assert!(!store.is_authenticated());
    }

    #[test]
    fn test_google_sign_up_needs_agreements() {
        let (store, _, mut flow) = setup();

        assert!(flow.google_sign_up().is_err());
        assert!(store.user().is_none());

        flow.agreements = Agreements::all();
        flow.google_sign_up().unwrap();

        let user = store.user().unwrap();
        assert_eq!(user.full_name().as_deref(), Some("Google User"));
        assert_eq!(user.email.as_deref(), Some("user@gmail.com"));
        assert!(store.is_authenticated());
    }
}

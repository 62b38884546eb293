use serde::{Deserialize, Serialize};

use crate::{
    auth::repo_types::{ContactChanges, User},
    tutors::Tutor,
};

/// The most specific view of the caller's account.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum Profile {
    Tutor(Tutor),
    User(User),
}

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub profile: Profile,
}

/// Body of `PATCH /profile`. Every field is optional; empty strings count as absent.
#[derive(Debug, Default, Deserialize)]
pub struct ProfileUpdate {
    pub firstname: Option<String>,
    pub lastname: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub bio: Option<String>,
    pub availability: Option<String>,
    pub tutoring: Option<Vec<TutoringDirective>>,
}

/// Add (`action: true`) or remove (`action: false`) the course `code`.
#[derive(Debug, Clone, Deserialize)]
pub struct TutoringDirective {
    pub code: String,
    pub action: bool,
}

impl ProfileUpdate {
    pub fn contact(&self) -> ContactChanges<'_> {
        ContactChanges {
            firstname: non_empty(&self.firstname),
            lastname: non_empty(&self.lastname),
            email: non_empty(&self.email),
            phone: non_empty(&self.phone),
        }
    }

    pub fn bio(&self) -> Option<&str> {
        non_empty(&self.bio)
    }

    pub fn availability(&self) -> Option<&str> {
        non_empty(&self.availability)
    }

    pub fn tutoring(&self) -> &[TutoringDirective] {
        self.tutoring.as_deref().unwrap_or_default()
    }
}

fn non_empty(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.is_empty())
}

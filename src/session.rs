/// User name the host framework assigns to unauthenticated requests.
pub const GUEST: &str = "Guest";

/// Identity of the request being rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    user: String,
}

impl Session {
    pub fn guest() -> Self {
        Self { user: GUEST.to_string() }
    }

    pub fn for_user(user: impl Into<String>) -> Self {
        Self { user: user.into() }
    }

    pub fn user(&self) -> &str {
        &self.user
    }

    pub fn is_guest(&self) -> bool {
        self.user == GUEST
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guest_detection_is_exact() {
        assert!(Session::guest().is_guest());
        assert!(Session::for_user("Guest").is_guest());
        assert!(!Session::for_user("guest").is_guest());
        assert!(!Session::for_user("alice@example.com").is_guest());
    }
}

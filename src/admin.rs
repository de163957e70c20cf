//! Declarative registration for the management console.
//!
//! Nothing here executes: an external console renderer consumes these
//! descriptions to build its CRUD surface. Field names refer to the columns
//! of the registered entity.

use serde::Serialize;

/// A named group of fields in the edit form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Fieldset {
    pub name: Option<&'static str>,
    pub fields: &'static [&'static str],
}

/// How one entity is surfaced in the console.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModelAdmin {
    pub model: &'static str,
    /// Columns of the list view. Empty means every field.
    pub list_display: &'static [&'static str],
    /// Sidebar filters. Empty disables filtering.
    pub list_filter: &'static [&'static str],
    /// Visible but never editable through the console.
    pub readonly_fields: &'static [&'static str],
    /// Edit-form layout. Empty means a single default group of every field.
    pub fieldsets: &'static [Fieldset],
}

impl ModelAdmin {
    /// Register a model with unrestricted defaults.
    pub const fn with_defaults(model: &'static str) -> Self {
        Self {
            model,
            list_display: &[],
            list_filter: &[],
            readonly_fields: &[],
            fieldsets: &[],
        }
    }
}

/// Console registry.
#[derive(Debug, Default, Clone)]
pub struct AdminSite {
    entries: Vec<ModelAdmin>,
}

impl AdminSite {
    /// Create an empty [`AdminSite`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an entity description.
    pub fn register(&mut self, admin: ModelAdmin) {
        self.entries.push(admin);
    }

    /// Look a registration up by model name.
    pub fn get(&self, model: &str) -> Option<&ModelAdmin> {
        self.entries.iter().find(|entry| entry.model == model)
    }

    /// Iterate registrations in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &ModelAdmin> {
        self.entries.iter()
    }
}

/// Console description of the user entity.
///
/// Identity fields and the credential are frozen once set; only `role` and
/// the password display widget remain on the form.
pub const USER_ADMIN: ModelAdmin = ModelAdmin {
    model: "User",
    list_display: &["email", "username", "first_name", "last_name", "role"],
    list_filter: &[],
    readonly_fields: &[
        "username",
        "email",
        "first_name",
        "last_name",
        "password",
    ],
    fieldsets: &[Fieldset {
        name: None,
        fields: &[
            "email",
            "username",
            "first_name",
            "last_name",
            "role",
            "password",
        ],
    }],
};

/// Console description of the profile entity, unrestricted.
pub const PROFILE_ADMIN: ModelAdmin = ModelAdmin::with_defaults("UserProfile");

/// The site consumed by the default console.
pub fn default_site() -> AdminSite {
    let mut site = AdminSite::new();
    site.register(USER_ADMIN);
    site.register(PROFILE_ADMIN);
    site
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_site_registers_both_entities() {
        let site = default_site();

        assert!(site.get("User").is_some());
        assert!(site.get("UserProfile").is_some());
        assert!(site.get("Order").is_none());
        assert_eq!(site.iter().count(), 2);
    }

    #[test]
    fn test_user_identity_fields_are_frozen() {
        let user = default_site().get("User").unwrap().clone();

        assert_eq!(
            user.list_display,
            ["email", "username", "first_name", "last_name", "role"]
        );
        for field in ["username", "email", "password"] {
            assert!(user.readonly_fields.contains(&field));
        }
        // Role stays editable.
        assert!(!user.readonly_fields.contains(&"role"));
        assert!(user.list_filter.is_empty());

        // Single unnamed group on the edit form.
        assert_eq!(user.fieldsets.len(), 1);
        assert_eq!(user.fieldsets[0].name, None);
        assert!(user.fieldsets[0].fields.contains(&"role"));
    }

    #[test]
    fn test_registration_serializes_for_renderer() {
        let value = serde_json::to_value(USER_ADMIN).unwrap();

        assert_eq!(value["model"], "User");
        assert_eq!(value["list_display"][0], "email");
        assert_eq!(value["fieldsets"][0]["name"], serde_json::Value::Null);
    }

    #[test]
    fn test_profile_is_unrestricted() {
        let profile = default_site().get("UserProfile").unwrap().clone();

        assert!(profile.readonly_fields.is_empty());
        assert!(profile.list_display.is_empty());
        assert!(profile.fieldsets.is_empty());
    }
}

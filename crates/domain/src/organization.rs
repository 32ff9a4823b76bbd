use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use warden_core::RecordId;

/// Physical PG location run by an organization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PgLocation {
    /// Location identifier.
    #[serde(rename = "s_no")]
    pub id: RecordId,
    /// Location name.
    pub location_name: String,
    /// Street address.
    #[serde(default)]
    pub address: Option<String>,
    /// Number of rooms.
    #[serde(default)]
    pub rooms_count: Option<u32>,
    /// Number of beds.
    #[serde(default)]
    pub beds_count: Option<u32>,
    /// Location status as reported by the API.
    #[serde(default)]
    pub status: Option<String>,
}

/// Administrator account of an organization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganizationAdmin {
    /// User identifier.
    #[serde(rename = "s_no")]
    pub id: RecordId,
    /// Display name.
    pub name: String,
    /// Email address.
    #[serde(default)]
    pub email: Option<String>,
    /// Phone number.
    #[serde(default)]
    pub phone: Option<String>,
    /// Account status as reported by the API.
    #[serde(default)]
    pub status: Option<String>,
}

/// Organization with its locations and administrators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organization {
    /// Organization identifier.
    #[serde(rename = "s_no")]
    pub id: RecordId,
    /// Organization name.
    pub name: String,
    /// Description.
    #[serde(default)]
    pub description: Option<String>,
    /// Number of locations as counted by the API.
    #[serde(default)]
    pub pg_locations_count: Option<u32>,
    /// Locations.
    #[serde(default)]
    pub pg_locations: Vec<PgLocation>,
    /// Administrators.
    #[serde(default)]
    pub admins: Vec<OrganizationAdmin>,
    /// Creation timestamp.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Lookup table resolving organization and location ids on tickets.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrganizationDirectory {
    organizations: Vec<Organization>,
}

impl OrganizationDirectory {
    /// Creates a directory from a listing.
    #[must_use]
    pub fn new(organizations: Vec<Organization>) -> Self {
        Self { organizations }
    }

    /// Returns the organization with the given id.
    #[must_use]
    pub fn find(&self, organization_id: RecordId) -> Option<&Organization> {
        self.organizations
            .iter()
            .find(|organization| organization.id == organization_id)
    }

    /// Returns a display name: `N/A` without an id, `Unknown` for an unlisted id.
    #[must_use]
    pub fn organization_name(&self, organization_id: Option<RecordId>) -> &str {
        let Some(organization_id) = organization_id else {
            return "N/A";
        };

        self.find(organization_id)
            .map(|organization| organization.name.as_str())
            .unwrap_or("Unknown")
    }

    /// Returns the location `pg_id` of organization `organization_id`.
    #[must_use]
    pub fn pg_location(
        &self,
        organization_id: Option<RecordId>,
        pg_id: Option<RecordId>,
    ) -> Option<&PgLocation> {
        let organization = self.find(organization_id?)?;
        let pg_id = pg_id?;
        organization
            .pg_locations
            .iter()
            .find(|location| location.id == pg_id)
    }

    /// Returns the listed organizations.
    #[must_use]
    pub fn organizations(&self) -> &[Organization] {
        self.organizations.as_slice()
    }
}

#[cfg(test)]
mod tests {
    use warden_core::RecordId;

    use super::{Organization, OrganizationDirectory};

    fn directory() -> OrganizationDirectory {
        let organizations = serde_json::from_str::<Vec<Organization>>(
            r#"[{
                "s_no": 1,
                "name": "Sunrise Stays",
                "pg_locations": [{"s_no": 10, "location_name": "Koramangala", "beds_count": 40}],
                "admins": [{"s_no": 5, "name": "Meera", "phone": "9000000001"}]
            }]"#,
        )
        .unwrap_or_default();

        OrganizationDirectory::new(organizations)
    }

    #[test]
    fn organization_name_distinguishes_missing_and_unknown() {
        let directory = directory();
        assert_eq!(directory.organization_name(None), "N/A");
        assert_eq!(directory.organization_name(Some(RecordId::new(99))), "Unknown");
        assert_eq!(
            directory.organization_name(Some(RecordId::new(1))),
            "Sunrise Stays"
        );
    }

    #[test]
    fn pg_location_requires_both_ids() {
        let directory = directory();
        assert!(
            directory
                .pg_location(Some(RecordId::new(1)), Some(RecordId::new(10)))
                .is_some_and(|location| location.location_name == "Koramangala")
        );
        assert!(directory.pg_location(Some(RecordId::new(1)), None).is_none());
        assert!(directory.pg_location(None, Some(RecordId::new(10))).is_none());
    }
}

//! Directory entities: users, groups and the polymorphic directory object.

use chrono::{DateTime, Utc};
use msgraph_abstractions::serialization::ODATA_TYPE_KEY;
use msgraph_abstractions::{InMemoryBackingStore, Parsable};
use serde_json::{Map, Value};

use super::Drive;

pub const USER_ODATA_TYPE: &str = "#microsoft.graph.user";
pub const GROUP_ODATA_TYPE: &str = "#microsoft.graph.group";
pub const DIRECTORY_OBJECT_ODATA_TYPE: &str = "#microsoft.graph.directoryObject";

graph_model! {
    /// Base of every addressable Graph resource.
    pub struct Entity {
        value "id" => id / set_id: String;
    }
}

graph_model! {
    /// A directory object of a type this library has no model for.
    pub struct BaseDirectoryObject = "#microsoft.graph.directoryObject" {
        value "id" => id / set_id: String;
        value "deletedDateTime" => deleted_date_time / set_deleted_date_time: DateTime<Utc>;
    }
}

graph_model! {
    pub struct PasswordProfile {
        value "forceChangePasswordNextSignIn" => force_change_password_next_sign_in / set_force_change_password_next_sign_in: bool;
        value "forceChangePasswordNextSignInWithMfa" => force_change_password_next_sign_in_with_mfa / set_force_change_password_next_sign_in_with_mfa: bool;
        value "password" => password / set_password: String;
    }
}

graph_model! {
    /// A Microsoft Entra user account.
    pub struct User = "#microsoft.graph.user" {
        value "id" => id / set_id: String;
        value "deletedDateTime" => deleted_date_time / set_deleted_date_time: DateTime<Utc>;
        value "accountEnabled" => account_enabled / set_account_enabled: bool;
        value "businessPhones" => business_phones / set_business_phones: Vec<String>;
        value "city" => city / set_city: String;
        value "companyName" => company_name / set_company_name: String;
        value "createdDateTime" => created_date_time / set_created_date_time: DateTime<Utc>;
        value "department" => department / set_department: String;
        value "displayName" => display_name / set_display_name: String;
        value "givenName" => given_name / set_given_name: String;
        value "jobTitle" => job_title / set_job_title: String;
        value "mail" => mail / set_mail: String;
        value "mailNickname" => mail_nickname / set_mail_nickname: String;
        value "mobilePhone" => mobile_phone / set_mobile_phone: String;
        value "officeLocation" => office_location / set_office_location: String;
        value "preferredLanguage" => preferred_language / set_preferred_language: String;
        value "surname" => surname / set_surname: String;
        value "usageLocation" => usage_location / set_usage_location: String;
        value "userPrincipalName" => user_principal_name / set_user_principal_name: String;
        value "userType" => user_type / set_user_type: String;
        object "passwordProfile" => password_profile / set_password_profile: PasswordProfile;
        object "drive" => drive / set_drive: Drive;
        collection "memberOf" => member_of / set_member_of: DirectoryObject;
    }
}

graph_model! {
    /// A Microsoft 365 group or security group.
    pub struct Group = "#microsoft.graph.group" {
        value "id" => id / set_id: String;
        value "deletedDateTime" => deleted_date_time / set_deleted_date_time: DateTime<Utc>;
        value "classification" => classification / set_classification: String;
        value "createdDateTime" => created_date_time / set_created_date_time: DateTime<Utc>;
        value "description" => description / set_description: String;
        value "displayName" => display_name / set_display_name: String;
        value "groupTypes" => group_types / set_group_types: Vec<String>;
        value "mail" => mail / set_mail: String;
        value "mailEnabled" => mail_enabled / set_mail_enabled: bool;
        value "mailNickname" => mail_nickname / set_mail_nickname: String;
        value "securityEnabled" => security_enabled / set_security_enabled: bool;
        value "visibility" => visibility / set_visibility: String;
        object "drive" => drive / set_drive: Drive;
        collection "members" => members / set_members: DirectoryObject;
    }
}

/// A member of a directory collection such as `memberOf` or `members`.
///
/// Parsing dispatches on `@odata.type`; unknown discriminators keep their
/// payload in [`DirectoryObject::Other`].
#[derive(Debug, Clone, PartialEq)]
pub enum DirectoryObject {
    User(User),
    Group(Group),
    Other(BaseDirectoryObject),
}

impl Default for DirectoryObject {
    fn default() -> Self {
        DirectoryObject::Other(BaseDirectoryObject::new())
    }
}

impl DirectoryObject {
    pub fn id(&self) -> Option<String> {
        self.backing_store().get_value("id")
    }

    pub fn as_user(&self) -> Option<&User> {
        match self {
            DirectoryObject::User(user) => Some(user),
            _ => None,
        }
    }

    pub fn as_group(&self) -> Option<&Group> {
        match self {
            DirectoryObject::Group(group) => Some(group),
            _ => None,
        }
    }
}

impl From<User> for DirectoryObject {
    fn from(user: User) -> Self {
        DirectoryObject::User(user)
    }
}

impl From<Group> for DirectoryObject {
    fn from(group: Group) -> Self {
        DirectoryObject::Group(group)
    }
}

impl Parsable for DirectoryObject {
    const ODATA_TYPE: Option<&'static str> = Some(DIRECTORY_OBJECT_ODATA_TYPE);

    /// Dispatches on the discriminator held by the store.
    fn from_backing_store(store: InMemoryBackingStore) -> Self {
        match store.get_value::<String>(ODATA_TYPE_KEY).as_deref() {
            Some(USER_ODATA_TYPE) => DirectoryObject::User(User::from_backing_store(store)),
            Some(GROUP_ODATA_TYPE) => DirectoryObject::Group(Group::from_backing_store(store)),
            _ => DirectoryObject::Other(BaseDirectoryObject::from_backing_store(store)),
        }
    }

    fn backing_store(&self) -> &InMemoryBackingStore {
        match self {
            DirectoryObject::User(m) => m.backing_store(),
            DirectoryObject::Group(m) => m.backing_store(),
            DirectoryObject::Other(m) => m.backing_store(),
        }
    }

    fn backing_store_mut(&mut self) -> &mut InMemoryBackingStore {
        match self {
            DirectoryObject::User(m) => m.backing_store_mut(),
            DirectoryObject::Group(m) => m.backing_store_mut(),
            DirectoryObject::Other(m) => m.backing_store_mut(),
        }
    }

    fn field_names() -> &'static [&'static str] {
        BaseDirectoryObject::field_names()
    }

    fn additional_data(&self) -> Map<String, Value> {
        match self {
            DirectoryObject::User(m) => m.additional_data(),
            DirectoryObject::Group(m) => m.additional_data(),
            DirectoryObject::Other(m) => m.additional_data(),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
//  Tests
// ═══════════════════════════════════════════════════════════════════════

//! OneDrive / SharePoint drive models.

use chrono::{DateTime, Utc};

use super::Workbook;

graph_model! {
    pub struct Identity {
        value "displayName" => display_name / set_display_name: String;
        value "id" => id / set_id: String;
    }
}

graph_model! {
    pub struct IdentitySet {
        object "application" => application / set_application: Identity;
        object "device" => device / set_device: Identity;
        object "user" => user / set_user: Identity;
    }
}

graph_model! {
    /// Storage quota of a drive, in bytes.
    pub struct Quota {
        value "deleted" => deleted / set_deleted: i64;
        value "remaining" => remaining / set_remaining: i64;
        value "state" => state / set_state: String;
        value "total" => total / set_total: i64;
        value "used" => used / set_used: i64;
    }
}

graph_model! {
    pub struct ItemReference {
        value "driveId" => drive_id / set_drive_id: String;
        value "driveType" => drive_type / set_drive_type: String;
        value "id" => id / set_id: String;
        value "name" => name / set_name: String;
        value "path" => path / set_path: String;
        value "siteId" => site_id / set_site_id: String;
    }
}

graph_model! {
    /// Present on items that are files.
    pub struct FileFacet {
        value "mimeType" => mime_type / set_mime_type: String;
    }
}

graph_model! {
    /// Present on items that are folders.
    pub struct Folder {
        value "childCount" => child_count / set_child_count: i32;
    }
}

graph_model! {
    pub struct Drive = "#microsoft.graph.drive" {
        value "id" => id / set_id: String;
        value "createdDateTime" => created_date_time / set_created_date_time: DateTime<Utc>;
        value "description" => description / set_description: String;
        value "driveType" => drive_type / set_drive_type: String;
        value "lastModifiedDateTime" => last_modified_date_time / set_last_modified_date_time: DateTime<Utc>;
        value "name" => name / set_name: String;
        value "webUrl" => web_url / set_web_url: String;
        object "owner" => owner / set_owner: IdentitySet;
        object "quota" => quota / set_quota: Quota;
        object "root" => root / set_root: DriveItem;
        collection "items" => items / set_items: DriveItem;
    }
}

graph_model! {
    /// A file, folder or other item stored in a drive.
    pub struct DriveItem = "#microsoft.graph.driveItem" {
        value "id" => id / set_id: String;
        value "cTag" => c_tag / set_c_tag: String;
        value "createdDateTime" => created_date_time / set_created_date_time: DateTime<Utc>;
        value "description" => description / set_description: String;
        value "eTag" => e_tag / set_e_tag: String;
        value "lastModifiedDateTime" => last_modified_date_time / set_last_modified_date_time: DateTime<Utc>;
        value "name" => name / set_name: String;
        value "size" => size / set_size: i64;
        value "webUrl" => web_url / set_web_url: String;
        value "@microsoft.graph.conflictBehavior" => conflict_behavior / set_conflict_behavior: String;
        value "@microsoft.graph.downloadUrl" => download_url / set_download_url: String;
        object "createdBy" => created_by / set_created_by: IdentitySet;
        object "file" => file / set_file: FileFacet;
        object "folder" => folder / set_folder: Folder;
        object "parentReference" => parent_reference / set_parent_reference: ItemReference;
        object "workbook" => workbook / set_workbook: Workbook;
        collection "children" => children / set_children: DriveItem;
    }
}

impl DriveItem {
    pub fn is_folder(&self) -> bool {
        self.folder().is_some()
    }
}

// ═══════════════════════════════════════════════════════════════════════
//  Tests
// ═══════════════════════════════════════════════════════════════════════

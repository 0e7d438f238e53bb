//! HR record types as returned by the Zoho People forms API.
//!
//! Field names follow the API's form labels verbatim via `serde(rename)`;
//! every field is optional on the wire, and a missing or `null` value
//! decodes to empty.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DefaultOnNull};

/// Employee form record.
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Employee {
    #[serde_as(as = "DefaultOnNull")]
    #[serde(rename = "Zoho_ID")]
    pub zoho_id: i64,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(rename = "EmployeeID")]
    pub employee_id: String,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(rename = "ZUID")]
    pub zuid: String,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(rename = "FirstName")]
    pub first_name: String,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(rename = "Middle_Name")]
    pub middle_name: String,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(rename = "LastName")]
    pub last_name: String,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(rename = "Nick_Name")]
    pub nick_name: String,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(rename = "EmailID")]
    pub email_id: String,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(rename = "Other_Email")]
    pub other_email: String,

    #[serde_as(as = "DefaultOnNull")]
    #[serde(rename = "Department")]
    pub department: String,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(rename = "Department.ID")]
    pub department_id: String,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(rename = "Role")]
    pub role: String,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(rename = "Role.ID")]
    pub role_id: String,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(rename = "Designation")]
    pub designation: String,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(rename = "Designation.ID")]
    pub designation_id: String,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(rename = "Reporting_To")]
    pub reporting_to: String,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(rename = "Reporting_To.ID")]
    pub reporting_to_id: String,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(rename = "Reporting_To.MailID")]
    pub reporting_to_mail_id: String,

    #[serde_as(as = "DefaultOnNull")]
    #[serde(rename = "Employeestatus")]
    pub employee_status: String,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(rename = "Employeestatus.type")]
    pub employee_status_type: i64,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(rename = "Employee_type")]
    pub employee_type: String,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(rename = "Employee_type.id")]
    pub employee_type_id: String,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(rename = "Dateofjoining")]
    pub date_of_joining: String,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(rename = "Dateofexit")]
    pub date_of_exit: String,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(rename = "Experience")]
    pub experience: String,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(rename = "Experience.displayValue")]
    pub experience_display_value: String,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(rename = "total_experience")]
    pub total_experience: String,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(rename = "total_experience.displayValue")]
    pub total_experience_display_value: String,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(rename = "Source_of_hire")]
    pub source_of_hire: String,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(rename = "Source_of_hire.id")]
    pub source_of_hire_id: String,

    #[serde_as(as = "DefaultOnNull")]
    #[serde(rename = "LocationName")]
    pub location_name: String,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(rename = "LocationName.ID")]
    pub location_name_id: String,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(rename = "Work_location")]
    pub work_location: String,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(rename = "Work_phone")]
    pub work_phone: String,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(rename = "Extension")]
    pub extension: String,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(rename = "Mobile")]
    pub mobile: String,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(rename = "Mobile.country_code")]
    pub mobile_country_code: String,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(rename = "Present_Address")]
    pub present_address: String,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(rename = "Present_Address.childValues")]
    pub present_address_child_values: AddressParts,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(rename = "Permanent_Address")]
    pub permanent_address: String,

    #[serde_as(as = "DefaultOnNull")]
    #[serde(rename = "Date_of_birth")]
    pub date_of_birth: String,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(rename = "Gender")]
    pub gender: String,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(rename = "Marital_status")]
    pub marital_status: String,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(rename = "Marital_status.id")]
    pub marital_status_id: String,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(rename = "Citizenship")]
    pub citizenship: String,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(rename = "Ethnicity")]
    pub ethnicity: String,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(rename = "Ethnicity.id")]
    pub ethnicity_id: String,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(rename = "Veteran_Status")]
    pub veteran_status: String,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(rename = "Social_Security_Number")]
    pub social_security_number: String,

    #[serde_as(as = "DefaultOnNull")]
    #[serde(rename = "Photo")]
    pub photo: String,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(rename = "Photo_downloadUrl")]
    pub photo_download_url: String,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(rename = "AboutMe")]
    pub about_me: String,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(rename = "Expertise")]
    pub expertise: String,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(rename = "Tags")]
    pub tags: String,

    #[serde_as(as = "DefaultOnNull")]
    #[serde(rename = "ApprovalStatus")]
    pub approval_status: String,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(rename = "AddedBy")]
    pub added_by: String,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(rename = "AddedBy.ID")]
    pub added_by_id: String,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(rename = "AddedTime")]
    pub added_time: String,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(rename = "CreatedTime")]
    pub created_time: String,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(rename = "ModifiedBy")]
    pub modified_by: String,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(rename = "ModifiedBy.ID")]
    pub modified_by_id: String,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(rename = "ModifiedTime")]
    pub modified_time: String,

    #[serde_as(as = "DefaultOnNull")]
    #[serde(rename = "tabularSections")]
    pub tabular_sections: TabularSections,
}

impl Employee {
    /// `"{first} {last}"`, exactly as the directory displays it
    #[must_use]
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Platform id as a string, or `None` when the record carries none
    #[must_use]
    pub fn platform_id(&self) -> Option<String> {
        (self.zoho_id != 0).then(|| self.zoho_id.to_string())
    }
}

/// Structured parts of an address field.
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AddressParts {
    #[serde_as(as = "DefaultOnNull")]
    #[serde(rename = "ADDRESS1")]
    pub address1: String,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(rename = "ADDRESS2")]
    pub address2: String,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(rename = "CITY")]
    pub city: String,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(rename = "STATE")]
    pub state: String,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(rename = "STATE_CODE")]
    pub state_code: String,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(rename = "COUNTRY")]
    pub country: String,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(rename = "COUNTRY_CODE")]
    pub country_code: String,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(rename = "PINCODE")]
    pub pincode: String,
}

/// Nested sub-collections of an employee record (unordered).
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TabularSections {
    #[serde_as(as = "DefaultOnNull")]
    #[serde(rename = "Education Details")]
    pub education_details: Vec<EducationDetail>,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(rename = "Work Experience")]
    pub work_experience: Vec<WorkExperience>,
}

#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EducationDetail {
    #[serde_as(as = "DefaultOnNull")]
    #[serde(rename = "Specialization")]
    pub specialization: String,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(rename = "Degree")]
    pub degree: String,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(rename = "College")]
    pub college: String,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(rename = "Yearofgraduation")]
    pub year_of_graduation: String,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(rename = "tabular.ROWID")]
    pub row_id: String,
}

#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkExperience {
    #[serde_as(as = "DefaultOnNull")]
    #[serde(rename = "Jobtitle")]
    pub job_title: String,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(rename = "Employer")]
    pub employer: String,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(rename = "RELEVANCE")]
    pub relevance: String,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(rename = "RELEVANCE.id")]
    pub relevance_id: String,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(rename = "Previous_JobDesc")]
    pub previous_job_desc: String,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(rename = "FromDate")]
    pub from_date: String,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(rename = "Todate")]
    pub to_date: String,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(rename = "tabular.ROWID")]
    pub row_id: String,
}

/// Department form record.
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Department {
    #[serde_as(as = "DefaultOnNull")]
    #[serde(rename = "Zoho_ID")]
    pub zoho_id: i64,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(rename = "Department")]
    pub name: String,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(rename = "Mail_Alias")]
    pub mail_alias: String,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(rename = "Parent_Department")]
    pub parent_department: String,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(rename = "Parent_Department.ID")]
    pub parent_department_id: String,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(rename = "Department_Lead")]
    pub department_lead: String,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(rename = "Department_Lead.ID")]
    pub department_lead_id: String,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(rename = "Department_Lead.MailID")]
    pub department_lead_mail: String,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(rename = "ApprovalStatus")]
    pub approval_status: String,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(rename = "AddedBy")]
    pub added_by: String,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(rename = "AddedBy.ID")]
    pub added_by_id: String,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(rename = "AddedTime")]
    pub added_time: String,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(rename = "CreatedTime")]
    pub created_time: String,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(rename = "ModifiedBy")]
    pub modified_by: String,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(rename = "ModifiedBy.ID")]
    pub modified_by_id: String,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(rename = "ModifiedTime")]
    pub modified_time: String,
}

impl Department {
    /// Parent department id, when the record names one
    #[must_use]
    pub fn parent_id(&self) -> Option<&str> {
        let id = self.parent_department_id.trim();
        (!id.is_empty()).then_some(id)
    }

    /// Lead user id, when the record names one
    #[must_use]
    pub fn lead_id(&self) -> Option<&str> {
        let id = self.department_lead_id.trim();
        (!id.is_empty()).then_some(id)
    }
}

/// Envelope of a `getRecords` listing: `result` is a list of single-key
/// chunks, each holding a slice of records.
#[derive(Debug, Clone, Deserialize)]
pub struct PagedEnvelope<T> {
    pub response: PagedBody<T>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PagedBody<T> {
    pub result: Option<Vec<BTreeMap<String, Vec<T>>>>,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub uri: String,
    #[serde(default)]
    pub status: i64,
    /// Error payload sent instead of `result` (for example past the last page)
    #[serde(default)]
    pub errors: Option<serde_json::Value>,
}

impl<T> PagedEnvelope<T> {
    /// Flatten the chunks in encounter order, ignoring chunk keys
    #[must_use]
    pub fn into_records(self) -> Vec<T> {
        self.response
            .result
            .unwrap_or_default()
            .into_iter()
            .flat_map(|chunk| chunk.into_values().flatten())
            .collect()
    }
}

/// Envelope of a `getDataByID` lookup: `result` is a flat list.
#[derive(Debug, Clone, Deserialize)]
pub struct LookupEnvelope<T> {
    pub response: LookupBody<T>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LookupBody<T> {
    pub result: Option<Vec<T>>,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub uri: String,
    #[serde(default)]
    pub status: i64,
    #[serde(default)]
    pub errors: Option<serde_json::Value>,
}

impl<T> LookupEnvelope<T> {
    #[must_use]
    pub fn into_records(self) -> Vec<T> {
        self.response.result.unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flattens_chunks_in_encounter_order() {
        let json = r#"{"response":{"result":[
            {"k1":[{"Zoho_ID":1},{"Zoho_ID":2}]},
            {"k2":[{"Zoho_ID":3}]}
        ],"message":"Data fetched successfully",
        "uri":"/api/forms/employee/getRecords","status":0}}"#;

        let envelope: PagedEnvelope<Employee> = serde_json::from_str(json).unwrap();
        let ids: Vec<i64> = envelope.into_records().iter().map(|e| e.zoho_id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn missing_result_is_empty() {
        let json = r#"{"response":{
            "errors":{"code":7024,"message":"No records found"},
            "message":"Error occurred","status":1}}"#;
        let envelope: PagedEnvelope<Department> = serde_json::from_str(json).unwrap();
        assert!(envelope.response.errors.is_some());
        assert!(envelope.into_records().is_empty());
    }

    #[test]
    fn employee_decodes_dotted_fields() {
        let json = r#"{
            "Zoho_ID": 412762000000236001,
            "EmployeeID": "S19",
            "FirstName": "Lindon",
            "LastName": "Smith",
            "EmailID": "lindon@example.com",
            "Department": "Management",
            "Department.ID": "412762000000236230",
            "Role": "Manager",
            "Role.ID": "412762000000035009",
            "Employeestatus.type": 1,
            "tabularSections": {
                "Education Details": [{"Degree": "MBA", "tabular.ROWID": "9"}],
                "Work Experience": []
            }
        }"#;

        let employee: Employee = serde_json::from_str(json).unwrap();
        assert_eq!(employee.display_name(), "Lindon Smith");
        assert_eq!(employee.platform_id().as_deref(), Some("412762000000236001"));
        assert_eq!(employee.department_id, "412762000000236230");
        assert_eq!(employee.role_id, "412762000000035009");
        assert_eq!(employee.employee_status_type, 1);
        assert_eq!(employee.tabular_sections.education_details[0].degree, "MBA");
    }

    #[test]
    fn null_fields_decode_as_empty() {
        let json = r#"{
            "Zoho_ID": 5,
            "FirstName": "Ada",
            "Middle_Name": null,
            "Employeestatus.type": null,
            "Present_Address.childValues": null,
            "tabularSections": {"Education Details": null}
        }"#;

        let employee: Employee = serde_json::from_str(json).unwrap();
        assert_eq!(employee.middle_name, "");
        assert_eq!(employee.employee_status_type, 0);
        assert_eq!(employee.present_address_child_values, AddressParts::default());
        assert!(employee.tabular_sections.education_details.is_empty());

        let department: Department =
            serde_json::from_str(r#"{"Zoho_ID": 7, "Parent_Department.ID": null}"#).unwrap();
        assert!(department.parent_id().is_none());
    }

    #[test]
    fn zero_platform_id_is_absent() {
        assert!(Employee::default().platform_id().is_none());
    }

    #[test]
    fn department_optional_links() {
        let dept = Department {
            parent_department_id: " ".into(),
            department_lead_id: "77".into(),
            ..Department::default()
        };
        assert!(dept.parent_id().is_none());
        assert_eq!(dept.lead_id(), Some("77"));
    }

    #[test]
    fn lookup_envelope_is_flat() {
        let json = r#"{"response":{"result":[{"Zoho_ID":9,"Department":"Ops"}],"status":0}}"#;
        let envelope: LookupEnvelope<Department> = serde_json::from_str(json).unwrap();
        let records = envelope.into_records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "Ops");
    }
}

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Department {
    Analytics,
    Tech,
}

impl Department {
    pub const ALL: [Department; 2] = [Department::Analytics, Department::Tech];

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "Analytics" => Some(Department::Analytics),
            "Tech" => Some(Department::Tech),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Department::Analytics => "Analytics",
            Department::Tech => "Tech",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Position {
    Junior,
    Medior,
    Senior,
}

impl Position {
    pub const ALL: [Position; 3] = [Position::Junior, Position::Medior, Position::Senior];

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "Junior" => Some(Position::Junior),
            "Medior" => Some(Position::Medior),
            "Senior" => Some(Position::Senior),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Position::Junior => "Junior",
            Position::Medior => "Medior",
            Position::Senior => "Senior",
        }
    }
}

/// A stored employee record.
///
/// Field names serialize in camelCase so a persisted collection stays
/// readable by anything that consumed the historical storage format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub date_of_birth: NaiveDate,
    pub date_of_employment: NaiveDate,
    pub department: Department,
    pub position: Position,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Employee {
    /// Create a fresh record from validated input. Assigns a new id and
    /// sets both timestamps to now.
    pub fn new(fields: ValidEmployee) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            first_name: fields.first_name,
            last_name: fields.last_name,
            email: fields.email,
            phone: fields.phone,
            date_of_birth: fields.date_of_birth,
            date_of_employment: fields.date_of_employment,
            department: fields.department,
            position: fields.position,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace the mutable fields in place. The id and created_at are
    /// immutable; updated_at moves to now.
    pub fn apply(&mut self, fields: ValidEmployee) {
        self.first_name = fields.first_name;
        self.last_name = fields.last_name;
        self.email = fields.email;
        self.phone = fields.phone;
        self.date_of_birth = fields.date_of_birth;
        self.date_of_employment = fields.date_of_employment;
        self.department = fields.department;
        self.position = fields.position;
        self.updated_at = Utc::now();
    }
}

/// Raw form data for an employee, as collected by a UI layer.
///
/// Everything is a string here: dates, department and position arrive
/// unparsed and the validator turns them into a [`ValidEmployee`].
#[derive(Debug, Clone, Default)]
pub struct EmployeeInput {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub date_of_birth: String,
    pub date_of_employment: String,
    pub department: String,
    pub position: String,
}

/// Parsed and trimmed employee fields, produced only by the validator.
#[derive(Debug, Clone)]
pub struct ValidEmployee {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub date_of_birth: NaiveDate,
    pub date_of_employment: NaiveDate,
    pub department: Department,
    pub position: Position,
}

/// Demonstration records loaded when storage holds no collection yet.
pub fn seed_employees() -> Vec<Employee> {
    let rows = [
        ("Ahmet", "Sourtimes", "ahmet@sourtimes.org", "+90 532 123 45 67", (1990, 1, 15), (2022, 9, 23)),
        ("Mehmet", "Yılmaz", "mehmet.yilmaz@company.com", "+90 532 234 56 78", (1988, 5, 10), (2022, 8, 15)),
        ("Ayşe", "Kaya", "ayse.kaya@company.com", "+90 532 345 67 89", (1992, 3, 22), (2022, 7, 10)),
        ("Can", "Demir", "can.demir@company.com", "+90 532 456 78 90", (1991, 7, 30), (2022, 6, 5)),
        ("Zeynep", "Özkan", "zeynep.ozkan@company.com", "+90 532 567 89 01", (1993, 11, 12), (2022, 5, 20)),
    ];

    rows.iter()
        .map(|(first, last, email, phone, birth, hired)| {
            let date_of_birth = date(birth.0, birth.1, birth.2);
            let date_of_employment = date(hired.0, hired.1, hired.2);
            // Sample records carry their hire date as both timestamps.
            let stamp = date_of_employment
                .and_hms_opt(0, 0, 0)
                .unwrap_or_default()
                .and_utc();
            Employee {
                id: Uuid::new_v4(),
                first_name: (*first).to_string(),
                last_name: (*last).to_string(),
                email: (*email).to_string(),
                phone: (*phone).to_string(),
                date_of_birth,
                date_of_employment,
                department: Department::Analytics,
                position: Position::Junior,
                created_at: stamp,
                updated_at: stamp,
            }
        })
        .collect()
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

//! Type-safe enumerations for the academy domain.
//!
//! Every enum serializes as the label the legacy web client wrote into
//! its documents (Portuguese display labels for belts and statuses,
//! uppercase tags for roles and record types), so snapshots produced by
//! deployed installations keep parsing.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Belt color, ordered from Branca (white) to Preta (black).
///
/// The ordering matters for graduation: a promotion moves a student to the
/// belt with the next higher [`rank`](Self::rank). Kids belts (Cinza
/// through Verde) sit between white and blue per the IBJJF progression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BeltColor {
    #[serde(rename = "Branca")]
    White,
    #[serde(rename = "Cinza")]
    Grey,
    #[serde(rename = "Amarela")]
    Yellow,
    #[serde(rename = "Laranja")]
    Orange,
    #[serde(rename = "Verde")]
    Green,
    #[serde(rename = "Azul")]
    Blue,
    #[serde(rename = "Roxa")]
    Purple,
    #[serde(rename = "Marrom")]
    Brown,
    #[serde(rename = "Preta")]
    Black,
}

impl BeltColor {
    /// All belts in promotion order.
    pub const ALL: [Self; 9] = [
        Self::White,
        Self::Grey,
        Self::Yellow,
        Self::Orange,
        Self::Green,
        Self::Blue,
        Self::Purple,
        Self::Brown,
        Self::Black,
    ];

    /// Returns the wire/display label (Portuguese, as stored in documents).
    pub fn as_str(&self) -> &'static str {
        match self {
            BeltColor::White => "Branca",
            BeltColor::Grey => "Cinza",
            BeltColor::Yellow => "Amarela",
            BeltColor::Orange => "Laranja",
            BeltColor::Green => "Verde",
            BeltColor::Blue => "Azul",
            BeltColor::Purple => "Roxa",
            BeltColor::Brown => "Marrom",
            BeltColor::Black => "Preta",
        }
    }

    /// Promotion order, 1-based. Branca is 1, Preta is 9.
    pub fn rank(&self) -> u8 {
        match self {
            BeltColor::White => 1,
            BeltColor::Grey => 2,
            BeltColor::Yellow => 3,
            BeltColor::Orange => 4,
            BeltColor::Green => 5,
            BeltColor::Blue => 6,
            BeltColor::Purple => 7,
            BeltColor::Brown => 8,
            BeltColor::Black => 9,
        }
    }

    /// The next belt in promotion order, or `None` for Preta.
    pub fn successor(&self) -> Option<Self> {
        let idx = Self::ALL.iter().position(|b| b == self)?;
        Self::ALL.get(idx + 1).copied()
    }
}

impl fmt::Display for BeltColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for BeltColor {
    type Err = String;

    /// Parse a belt from its Portuguese label or English name,
    /// case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "branca" | "white" => Ok(BeltColor::White),
            "cinza" | "grey" | "gray" => Ok(BeltColor::Grey),
            "amarela" | "yellow" => Ok(BeltColor::Yellow),
            "laranja" | "orange" => Ok(BeltColor::Orange),
            "verde" | "green" => Ok(BeltColor::Green),
            "azul" | "blue" => Ok(BeltColor::Blue),
            "roxa" | "purple" => Ok(BeltColor::Purple),
            "marrom" | "brown" => Ok(BeltColor::Brown),
            "preta" | "black" => Ok(BeltColor::Black),
            other => Err(format!("unknown belt color: {other}")),
        }
    }
}

/// Enrollment status of a student.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum StudentStatus {
    #[default]
    #[serde(rename = "Ativo")]
    Active,
    #[serde(rename = "Inativo")]
    Inactive,
    /// Enrollment on hold ("trancado"): the student keeps their history
    /// but is not billed.
    #[serde(rename = "Trancado")]
    Frozen,
}

impl StudentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            StudentStatus::Active => "Ativo",
            StudentStatus::Inactive => "Inativo",
            StudentStatus::Frozen => "Trancado",
        }
    }
}

impl fmt::Display for StudentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for StudentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ativo" | "active" => Ok(StudentStatus::Active),
            "inativo" | "inactive" => Ok(StudentStatus::Inactive),
            "trancado" | "frozen" => Ok(StudentStatus::Frozen),
            other => Err(format!("unknown student status: {other}")),
        }
    }
}

/// Settlement status of a ledger entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PaymentStatus {
    #[serde(rename = "Pago")]
    Paid,
    #[default]
    #[serde(rename = "Pendente")]
    Pending,
    #[serde(rename = "Atrasado")]
    Overdue,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Paid => "Pago",
            PaymentStatus::Pending => "Pendente",
            PaymentStatus::Overdue => "Atrasado",
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for PaymentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pago" | "paid" => Ok(PaymentStatus::Paid),
            "pendente" | "pending" => Ok(PaymentStatus::Pending),
            "atrasado" | "overdue" => Ok(PaymentStatus::Overdue),
            other => Err(format!("unknown payment status: {other}")),
        }
    }
}

/// Direction of a ledger entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntryType {
    #[serde(rename = "INCOME")]
    Income,
    #[serde(rename = "EXPENSE")]
    Expense,
}

impl EntryType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryType::Income => "INCOME",
            EntryType::Expense => "EXPENSE",
        }
    }
}

impl fmt::Display for EntryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for EntryType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" | "receita" => Ok(EntryType::Income),
            "expense" | "despesa" => Ok(EntryType::Expense),
            other => Err(format!("unknown entry type: {other}")),
        }
    }
}

/// Channel a check-in was recorded through.
///
/// `Kiosk` serializes as `TOTEM`, the tag the deployed client wrote for
/// its self-service totem screen. `QRCODE` is accepted on read for
/// documents produced by older builds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CheckInMethod {
    /// Tapped on the roster by an instructor.
    #[serde(rename = "MANUAL")]
    Manual,
    /// Self-service kiosk at the academy entrance.
    #[serde(rename = "TOTEM", alias = "QRCODE")]
    Kiosk,
}

impl CheckInMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckInMethod::Manual => "MANUAL",
            CheckInMethod::Kiosk => "TOTEM",
        }
    }
}

impl fmt::Display for CheckInMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Role tag carried with the session user. Not an authorization system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UserRole {
    #[serde(rename = "ADMIN")]
    Admin,
    #[serde(rename = "PROFESSOR")]
    Professor,
    #[serde(rename = "STUDENT")]
    Student,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Admin => "ADMIN",
            UserRole::Professor => "PROFESSOR",
            UserRole::Student => "STUDENT",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "admin" => Ok(UserRole::Admin),
            "professor" => Ok(UserRole::Professor),
            "student" | "aluno" => Ok(UserRole::Student),
            other => Err(format!("unknown user role: {other}")),
        }
    }
}

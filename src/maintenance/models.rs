//! Maintenance request models.

use std::fmt;

use jiff::{Timestamp, civil::Date};

use crate::{maintenance::RelatedRecords, search::SpaceCaption, uuids::TypedUuid};

/// Maintenance request UUID
pub type MaintenanceRequestUuid = TypedUuid<MaintenanceRequest>;

/// Staff member or contractor
#[derive(Debug)]
pub struct User;

/// User UUID
pub type UserUuid = TypedUuid<User>;

/// What a user may do with maintenance requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Housing company staff.
    Staff,
    /// Contractor with restricted access to finished requests.
    ExternalContractor,
}

/// The user performing an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    /// Acting user.
    pub user: UserUuid,
    /// Role the user acts in.
    pub role: Role,
}

impl Actor {
    /// Staff member `user`.
    #[must_use]
    pub fn staff(user: UserUuid) -> Self {
        Self {
            user,
            role: Role::Staff,
        }
    }

    /// External contractor `user`.
    #[must_use]
    pub fn external_contractor(user: UserUuid) -> Self {
        Self {
            user,
            role: Role::ExternalContractor,
        }
    }

    /// Whether contractor restrictions apply.
    #[must_use]
    pub fn is_external_contractor(&self) -> bool {
        self.role == Role::ExternalContractor
    }
}

/// Workflow stage, in board order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Stage {
    /// `Väntar på handläggning`
    #[default]
    WaitingForHandling,
    /// `Resurs tilldelad`
    ResourceAssigned,
    /// `Påbörjad`
    Started,
    /// `Väntar på beställda varor`
    WaitingForOrderedGoods,
    /// `Utförd`
    Done,
    /// `Avslutad`
    Closed,
}

impl Stage {
    /// Every stage in board order.
    pub const ALL: [Self; 6] = [
        Self::WaitingForHandling,
        Self::ResourceAssigned,
        Self::Started,
        Self::WaitingForOrderedGoods,
        Self::Done,
        Self::Closed,
    ];

    /// Swedish stage name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::WaitingForHandling => "Väntar på handläggning",
            Self::ResourceAssigned => "Resurs tilldelad",
            Self::Started => "Påbörjad",
            Self::WaitingForOrderedGoods => "Väntar på beställda varor",
            Self::Done => "Utförd",
            Self::Closed => "Avslutad",
        }
    }

    /// `Avslutad` is the done stage; only it carries a close date.
    #[must_use]
    pub const fn is_done(self) -> bool {
        matches!(self, Self::Closed)
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Requested turnaround.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Priority {
    /// `1 dag`
    OneDay,
    /// `5 dagar`
    FiveDays,
    /// `7 dagar`
    #[default]
    SevenDays,
    /// `10 dagar`
    TenDays,
    /// `2 veckor`
    TwoWeeks,
    /// `3 veckor`
    ThreeWeeks,
    /// `5 veckor`
    FiveWeeks,
    /// `8 veckor`
    EightWeeks,
}

impl Priority {
    /// Turnaround in days.
    #[must_use]
    pub const fn days(self) -> i32 {
        match self {
            Self::OneDay => 1,
            Self::FiveDays => 5,
            Self::SevenDays => 7,
            Self::TenDays => 10,
            Self::TwoWeeks => 14,
            Self::ThreeWeeks => 21,
            Self::FiveWeeks => 35,
            Self::EightWeeks => 56,
        }
    }

    /// Swedish label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::OneDay => "1 dag",
            Self::FiveDays => "5 dagar",
            Self::SevenDays => "7 dagar",
            Self::TenDays => "10 dagar",
            Self::TwoWeeks => "2 veckor",
            Self::ThreeWeeks => "3 veckor",
            Self::FiveWeeks => "5 veckor",
            Self::EightWeeks => "8 veckor",
        }
    }
}

/// Where a request was registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CreationOrigin {
    /// Submitted by a tenant through Mimer.nu.
    MimerNu,

    /// Registered by staff.
    #[default]
    Internal,
}

/// A created maintenance request and the records it owns.
#[derive(Debug, Clone, PartialEq)]
pub struct MaintenanceRequest {
    /// Request id.
    pub uuid: MaintenanceRequestUuid,
    /// Short summary.
    pub title: String,
    /// Free text description, possibly HTML.
    pub description: Option<String>,
    /// Kind of space the request concerns.
    pub space_caption: Option<SpaceCaption>,
    /// Requested turnaround.
    pub priority: Priority,
    /// Where the request came from.
    pub origin: CreationOrigin,
    /// Current workflow stage.
    pub stage: Stage,

    /// User who registered the request.
    pub owner: UserUuid,

    /// Resource working on the request.
    pub assignee: Option<UserUuid>,
    /// Day the request reached the done stage.
    pub close_date: Option<Date>,
    /// Hidden from the board.
    pub archived: bool,
    /// Records promoted from the search options.
    pub records: RelatedRecords,
    /// Registration time.
    pub created_at: Timestamp,
}

impl MaintenanceRequest {
    /// Rental id of the promoted rental property, if any.
    #[must_use]
    pub fn rental_object_id(&self) -> Option<&str> {
        self.records
            .rental_property
            .as_ref()
            .map(|rental_property| rental_property.name.as_str())
    }

    /// Latest date the work should be done by.
    ///
    /// # Errors
    ///
    /// Returns an error when the due date falls outside the supported range.
    pub fn due_date(&self, time_zone: &jiff::tz::TimeZone) -> Result<Date, jiff::Error> {
        let created = self.created_at.to_zoned(time_zone.clone()).date();

        created.checked_add(jiff::Span::new().days(self.priority.days()))
    }
}

/// Changes applied by an update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MaintenanceRequestUpdate {
    /// New title.
    pub title: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New priority.
    pub priority: Option<Priority>,
    /// New stage.
    pub stage: Option<Stage>,

    /// `Some(None)` unassigns.
    pub assignee: Option<Option<UserUuid>>,
}

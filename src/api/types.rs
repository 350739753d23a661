use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::application::rental::{DEFAULT_PAGE, DEFAULT_PAGE_SIZE, Page};
use crate::domain::{
    BranchId, Rental, RentalId, RentalStatus, VehicleId,
    commands::{RequestRental, ReviseRental},
};

pub const RENTALS_PATH: &str = "/api/rentals";

/// POST /api/rentals
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CreateRentalRequest {
    pub vehicle_id: i64,
    pub branch_id: i64,
    pub customer_name: String,
    pub customer_cpf: String,
    pub customer_phone: String,
    pub start: DateTime<Utc>,
    #[serde(default)]
    pub end: Option<DateTime<Utc>>,
    pub hourly_rate: Decimal,
}

impl CreateRentalRequest {
    pub fn to_command(&self) -> RequestRental {
        RequestRental {
            vehicle_id: VehicleId::new(self.vehicle_id),
            branch_id: BranchId::new(self.branch_id),
            customer_name: self.customer_name.clone(),
            customer_cpf: self.customer_cpf.clone(),
            customer_phone: self.customer_phone.clone(),
            start: self.start,
            end: self.end,
            hourly_rate: self.hourly_rate,
        }
    }
}

/// PUT /api/rentals/:id
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UpdateRentalRequest {
    pub customer_name: String,
    pub customer_phone: String,
    pub start: DateTime<Utc>,
    #[serde(default)]
    pub end: Option<DateTime<Utc>>,
}

impl UpdateRentalRequest {
    pub fn into_command(self, rental_id: RentalId) -> ReviseRental {
        ReviseRental {
            rental_id,
            customer_name: self.customer_name,
            customer_phone: self.customer_phone,
            start: self.start,
            end: self.end,
        }
    }
}

/// Hypermedia link to a related action
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Link {
    pub href: String,
    pub rel: String,
    pub method: String,
}

impl Link {
    fn new(href: impl Into<String>, rel: &str, method: &str) -> Self {
        Self {
            href: href.into(),
            rel: rel.to_string(),
            method: method.to_string(),
        }
    }
}

/// Links offered on every rental representation
pub fn rental_links(id: RentalId) -> Vec<Link> {
    let base = format!("{}/{}", RENTALS_PATH, id.value());
    vec![
        Link::new(base.clone(), "self", "GET"),
        Link::new(base.clone(), "update", "PUT"),
        Link::new(base.clone(), "delete", "DELETE"),
        Link::new(format!("{}/start", base), "start", "PATCH"),
        Link::new(format!("{}/finish", base), "finish", "PATCH"),
        Link::new(format!("{}/cancel", base), "cancel", "PATCH"),
        Link::new(format!("{}/total", base), "calculate-total", "GET"),
    ]
}

/// Rental representation returned by every endpoint
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RentalResponse {
    pub id: i64,
    pub vehicle_id: i64,
    pub branch_id: i64,
    pub customer_name: String,
    pub customer_cpf: String,
    pub customer_phone: String,
    pub start: DateTime<Utc>,
    pub end: Option<DateTime<Utc>>,
    pub hourly_rate: Decimal,
    pub total_value: Option<Decimal>,
    pub status: RentalStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub links: Vec<Link>,
}

impl From<Rental> for RentalResponse {
    fn from(rental: Rental) -> Self {
        Self {
            id: rental.id.value(),
            vehicle_id: rental.vehicle_id.value(),
            branch_id: rental.branch_id.value(),
            customer_name: rental.customer.name.as_str().to_string(),
            customer_cpf: rental.customer.cpf.as_str().to_string(),
            customer_phone: rental.customer.phone.as_str().to_string(),
            start: rental.start,
            end: rental.end,
            hourly_rate: rental.hourly_rate.value(),
            total_value: rental.total_value,
            status: rental.status,
            created_at: rental.created_at,
            updated_at: rental.updated_at,
            links: rental_links(rental.id),
        }
    }
}

/// GET /api/rentals
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PagedResponse<T> {
    pub items: Vec<T>,
    pub total_count: u64,
    pub page: u32,
    pub page_size: u32,
    pub total_pages: u64,
    pub has_next: bool,
    pub has_previous: bool,
}

impl From<Page<Rental>> for PagedResponse<RentalResponse> {
    fn from(page: Page<Rental>) -> Self {
        Self {
            items: page.items.into_iter().map(RentalResponse::from).collect(),
            total_count: page.total_count,
            page: page.page,
            page_size: page.page_size,
            total_pages: page.total_pages,
            has_next: page.has_next,
            has_previous: page.has_previous,
        }
    }
}

/// GET /api/rentals/:id/total
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TotalValueResponse {
    pub rental_id: i64,
    pub total_value: Option<Decimal>,
}

/// GET /api/rentals/availability
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AvailabilityResponse {
    pub vehicle_id: i64,
    pub available: bool,
}

#[derive(Debug, Deserialize)]
pub struct ListRentalsQuery {
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

fn default_page() -> u32 {
    DEFAULT_PAGE
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

#[derive(Debug, Deserialize)]
pub struct CpfQuery {
    pub cpf: String,
}

/// Inclusive bounds on the rental start
#[derive(Debug, Deserialize)]
pub struct PeriodQuery {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct AvailabilityParams {
    pub vehicle_id: i64,
    pub start: DateTime<Utc>,
    pub end: Option<DateTime<Utc>>,
    pub exclude_id: Option<i64>,
}

/// Error body
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
        }
    }
}

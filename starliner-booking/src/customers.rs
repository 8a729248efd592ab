use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use starliner_core::{CoreError, CoreResult};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CustomerStatus {
    Active,
    Inactive,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub country: String,
    pub postal_code: String,
    pub total_bookings: u32,
    pub total_spent: u32,
    pub last_booking_date: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub status: CustomerStatus,
}

/// Admin input for a new customer
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewCustomer {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub postal_code: String,
    pub country: String,
}

/// In-memory customer list backing the admin panel
pub struct CustomerDirectory {
    customers: Vec<Customer>,
}

impl CustomerDirectory {
    pub fn new(customers: Vec<Customer>) -> Self {
        Self { customers }
    }

    pub fn list(&self, status: Option<CustomerStatus>) -> Vec<Customer> {
        self.customers
            .iter()
            .filter(|c| status.map_or(true, |s| c.status == s))
            .cloned()
            .collect()
    }

    pub fn get(&self, id: &str) -> Option<&Customer> {
        self.customers.iter().find(|c| c.id == id)
    }

    pub fn create(&mut self, input: NewCustomer, now: DateTime<Utc>) -> CoreResult<Customer> {
        let missing = [
            &input.name,
            &input.email,
            &input.phone,
            &input.postal_code,
            &input.country,
        ]
        .iter()
        .any(|field| field.trim().is_empty());
        if missing {
            return Err(CoreError::ValidationError("Missing required fields".to_string()));
        }

        let mut millis = now.timestamp_millis();
        while self.get(&format!("CUST{}", millis)).is_some() {
            millis += 1;
        }

        let customer = Customer {
            id: format!("CUST{}", millis),
            name: input.name,
            email: input.email,
            phone: input.phone,
            country: input.country,
            postal_code: input.postal_code,
            total_bookings: 0,
            total_spent: 0,
            last_booking_date: now.date_naive(),
            created_at: now,
            status: CustomerStatus::Active,
        };

        tracing::info!(customer_id = %customer.id, "Customer created");
        self.customers.push(customer.clone());
        Ok(customer)
    }
}

impl Default for CustomerDirectory {
    fn default() -> Self {
        Self::new(demo_customers())
    }
}

#[allow(clippy::too_many_arguments)]
fn customer(
    id: &str,
    name: &str,
    email: &str,
    phone: &str,
    country: &str,
    postal_code: &str,
    total_bookings: u32,
    total_spent: u32,
    last_booking: (i32, u32, u32),
    created: (i32, u32, u32, u32, u32),
    status: CustomerStatus,
) -> Customer {
    let (y, m, d) = last_booking;
    let (cy, cm, cd, ch, cmin) = created;
    Customer {
        id: id.to_string(),
        name: name.to_string(),
        email: email.to_string(),
        phone: phone.to_string(),
        country: country.to_string(),
        postal_code: postal_code.to_string(),
        total_bookings,
        total_spent,
        last_booking_date: NaiveDate::from_ymd_opt(y, m, d).unwrap_or(NaiveDate::MIN),
        created_at: Utc
            .with_ymd_and_hms(cy, cm, cd, ch, cmin, 0)
            .single()
            .unwrap_or(DateTime::<Utc>::MIN_UTC),
        status,
    }
}

/// Seed data shown in the admin panel
pub fn demo_customers() -> Vec<Customer> {
    use CustomerStatus::{Active, Inactive};
    vec![
        customer(
            "CUST001",
            "John Doe",
            "john.doe@example.com",
            "+1 (555) 123-4567",
            "United States",
            "10001",
            5,
            1245,
            (2025, 1, 15),
            (2024, 6, 10, 10, 30),
            Active,
        ),
        customer(
            "CUST002",
            "Sarah Smith",
            "sarah.smith@example.com",
            "+1 (555) 234-5678",
            "United States",
            "94102",
            3,
            892,
            (2025, 1, 18),
            (2024, 8, 22, 14, 20),
            Active,
        ),
        customer(
            "CUST003",
            "Michael Johnson",
            "michael.j@example.com",
            "+1 (555) 345-6789",
            "United States",
            "33139",
            2,
            556,
            (2025, 1, 20),
            (2024, 9, 15, 9, 15),
            Active,
        ),
        customer(
            "CUST004",
            "Emily Davis",
            "emily.davis@example.com",
            "+1 (555) 456-7890",
            "Canada",
            "M5H 2N2",
            7,
            2134,
            (2024, 12, 28),
            (2024, 3, 5, 11, 45),
            Active,
        ),
        customer(
            "CUST005",
            "David Wilson",
            "david.wilson@example.com",
            "+44 20 7946 0958",
            "United Kingdom",
            "SW1A 1AA",
            1,
            129,
            (2024, 8, 12),
            (2024, 8, 10, 16, 20),
            Inactive,
        ),
    ]
}

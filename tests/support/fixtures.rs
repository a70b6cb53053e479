use chrono::{TimeZone, Utc};
use shifa::models::ProviderRecord;
use uuid::Uuid;

pub fn provider(
    id: u128,
    name: &str,
    gender: &str,
    city: &str,
    experience_years: f64,
    fee_amount: f64,
    modes: &[&str],
    specialties: &[&str],
) -> ProviderRecord {
    ProviderRecord {
        id: Uuid::from_u128(id),
        name: name.to_string(),
        profile_url: String::new(),
        gender: gender.to_string(),
        city: city.to_string(),
        experience_years,
        email: String::new(),
        phone: String::new(),
        modes: modes.iter().map(|s| s.to_string()).collect(),
        education: vec!["MBBS".to_string()],
        prior_roles: Vec::new(),
        specialties: specialties.iter().map(|s| s.to_string()).collect(),
        about: String::new(),
        fees_raw: String::new(),
        fee_amount,
        fee_currency: "PKR".to_string(),
        created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
    }
}

/// The four-provider directory exercised by the endpoint tests: two in
/// Karachi, one of them female in the lowest experience bucket, and one
/// record per experience/fee bucket overall.
pub fn directory() -> Vec<ProviderRecord> {
    vec![
        provider(
            1,
            "Dr. Sarah Ahmed",
            "Female",
            "Karachi",
            3.0,
            2500.0,
            &["In-person"],
            &["Anxiety", "Depression"],
        ),
        provider(
            2,
            "Dr. Bilal Khan",
            "Male",
            "Lahore",
            8.0,
            4000.0,
            &["Virtual telepho"],
            &["Mood disorders"],
        ),
        provider(
            3,
            "Dr. Imran Qureshi",
            "Male",
            "Karachi",
            12.0,
            5500.0,
            &["In person", "ic"],
            &["Trauma"],
        ),
        provider(
            4,
            "Dr. Maryam Siddiqui",
            "Female",
            "Islamabad",
            18.0,
            7000.0,
            &["Virtual video-based"],
            &["Anxiety"],
        ),
    ]
}

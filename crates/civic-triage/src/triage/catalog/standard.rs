use super::{CatalogDefinition, DepartmentDefinition, LocationMultiplier};
use std::collections::BTreeMap;

pub fn standard_definition() -> CatalogDefinition {
    CatalogDefinition {
        departments: standard_departments(),
        location_multipliers: standard_location_multipliers(),
        priority_base_scores: table(&[
            ("critical", 90.0),
            ("high", 70.0),
            ("medium", 50.0),
            ("low", 30.0),
        ]),
        category_multipliers: table(&[
            ("utilities", 1.4),
            ("traffic", 1.3),
            ("public-safety", 1.5),
            ("infrastructure", 1.2),
            ("sanitation", 1.1),
            ("environment", 1.3),
        ]),
        officer_pools: standard_officer_pools(),
        resolution_hours: standard_resolution_hours(),
        urgent_keywords: urgent_keywords(),
    }
}

pub(super) fn urgent_keywords() -> Vec<String> {
    [
        "burst",
        "flooding",
        "emergency",
        "danger",
        "unsafe",
        "critical",
        "urgent",
        "immediate",
    ]
    .iter()
    .map(|keyword| keyword.to_string())
    .collect()
}

fn department(
    id: &str,
    name: &str,
    description: &str,
    keywords: &[&str],
    urgency_multiplier: f64,
) -> DepartmentDefinition {
    DepartmentDefinition {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        keywords: keywords.iter().map(|keyword| keyword.to_string()).collect(),
        urgency_multiplier,
    }
}

fn standard_departments() -> Vec<DepartmentDefinition> {
    vec![
        department(
            "water-utilities",
            "Water & Utilities",
            "Water supply, sewage, drainage, and utility infrastructure",
            &[
                "water", "pipe", "leak", "burst", "sewage", "drain", "flooding", "utility", "main",
                "hydrant",
            ],
            1.5,
        ),
        department(
            "transportation",
            "Transportation",
            "Traffic signals, road signs, and traffic management",
            &[
                "traffic",
                "signal",
                "light",
                "sign",
                "intersection",
                "crossing",
                "pedestrian",
                "vehicle",
                "lane",
            ],
            1.3,
        ),
        department(
            "public-works",
            "Public Works",
            "Road maintenance, infrastructure repair, and construction",
            &[
                "pothole",
                "road",
                "pavement",
                "sidewalk",
                "curb",
                "bridge",
                "construction",
                "repair",
                "crack",
            ],
            1.2,
        ),
        department(
            "sanitation",
            "Sanitation",
            "Waste management, garbage collection, and street cleaning",
            &[
                "garbage",
                "trash",
                "waste",
                "bin",
                "collection",
                "overflow",
                "dump",
                "litter",
                "cleanup",
                "recycle",
            ],
            1.1,
        ),
        department(
            "electrical-services",
            "Electrical Services",
            "Street lighting, electrical infrastructure, and power systems",
            &[
                "streetlight",
                "light",
                "electrical",
                "power",
                "outage",
                "cable",
                "wire",
                "pole",
                "transformer",
            ],
            1.3,
        ),
        department(
            "parks-recreation",
            "Parks & Recreation",
            "Parks, playgrounds, recreational facilities, and green spaces",
            &[
                "park",
                "playground",
                "bench",
                "tree",
                "grass",
                "recreation",
                "sports",
                "garden",
                "fence",
                "equipment",
            ],
            1.0,
        ),
        department(
            "public-safety",
            "Public Safety",
            "Security, emergency response, and public safety concerns",
            &[
                "safety",
                "emergency",
                "security",
                "camera",
                "crime",
                "vandalism",
                "graffiti",
                "dangerous",
                "hazard",
            ],
            1.4,
        ),
        department(
            "maintenance",
            "General Maintenance",
            "Building maintenance and general repairs",
            &[
                "building",
                "maintenance",
                "repair",
                "damage",
                "broken",
                "fix",
                "clean",
                "paint",
                "structure",
            ],
            1.0,
        ),
        department(
            "environmental",
            "Environmental Services",
            "Environmental concerns, pollution, and air quality",
            &[
                "pollution",
                "environment",
                "air",
                "noise",
                "contamination",
                "chemical",
                "toxic",
                "smell",
                "fumes",
            ],
            1.3,
        ),
    ]
}

fn standard_location_multipliers() -> Vec<LocationMultiplier> {
    [
        ("hospital", 2.0),
        ("school", 1.8),
        ("emergency", 1.9),
        ("medical", 1.8),
        ("downtown", 1.4),
        ("business", 1.3),
        ("residential", 1.1),
        ("park", 1.0),
    ]
    .iter()
    .map(|(keyword, multiplier)| LocationMultiplier {
        keyword: keyword.to_string(),
        multiplier: *multiplier,
    })
    .collect()
}

fn standard_officer_pools() -> BTreeMap<String, Vec<String>> {
    let pools: [(&str, [&str; 3]); 9] = [
        (
            "water-utilities",
            ["James Wilson", "Sarah Martinez", "Mike Chen"],
        ),
        (
            "transportation",
            ["Maria Rodriguez", "David Park", "Lisa Wang"],
        ),
        ("public-works", ["Robert Kim", "Sarah Lee", "Tom Johnson"]),
        ("sanitation", ["Lisa Park", "Carlos Martinez", "Anna Davis"]),
        (
            "electrical-services",
            ["Tom Davis", "Jennifer Liu", "Mark Thompson"],
        ),
        (
            "parks-recreation",
            ["Mike Johnson", "David Chen", "Emma Wilson"],
        ),
        (
            "public-safety",
            ["Sarah Connor", "John Smith", "Alex Rodriguez"],
        ),
        ("maintenance", ["Anna Thompson", "Chris Lee", "Mary Johnson"]),
        ("environmental", ["Dr. Green", "Sam Taylor", "Nina Patel"]),
    ];

    pools
        .iter()
        .map(|(department, officers)| {
            (
                department.to_string(),
                officers.iter().map(|name| name.to_string()).collect(),
            )
        })
        .collect()
}

fn standard_resolution_hours() -> BTreeMap<String, BTreeMap<String, u32>> {
    // critical, high, medium, low
    let rows: [(&str, [u32; 4]); 9] = [
        ("water-utilities", [2, 4, 12, 48]),
        ("transportation", [4, 8, 24, 72]),
        ("public-works", [6, 12, 48, 168]),
        ("sanitation", [8, 24, 48, 168]),
        ("electrical-services", [4, 8, 24, 72]),
        ("parks-recreation", [12, 24, 72, 336]),
        ("public-safety", [1, 2, 8, 24]),
        ("maintenance", [8, 24, 72, 336]),
        ("environmental", [4, 12, 48, 168]),
    ];

    rows.iter()
        .map(|(department, hours)| {
            let row = ["critical", "high", "medium", "low"]
                .iter()
                .zip(hours.iter())
                .map(|(priority, hours)| (priority.to_string(), *hours))
                .collect();
            (department.to_string(), row)
        })
        .collect()
}

fn table(entries: &[(&str, f64)]) -> BTreeMap<String, f64> {
    entries
        .iter()
        .map(|(key, value)| (key.to_string(), *value))
        .collect()
}

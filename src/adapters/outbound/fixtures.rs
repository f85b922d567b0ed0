use crate::domains::route::{
    Assignment, FormField, FormFieldKind, Location, Route, Task, WorkStatus,
};
use chrono::{DateTime, Duration, Utc};

pub const SAMPLE_ROUTE_ID: &str = "route-1";
pub const SAMPLE_DRIVER_ID: &str = "driver-1";

pub fn sample_route(now: DateTime<Utc>) -> Route {
    Route {
        id: SAMPLE_ROUTE_ID.to_string(),
        driver_id: SAMPLE_DRIVER_ID.to_string(),
        date: now,
        status: WorkStatus::InProgress,
        assignments: vec![
            "assignment-1".to_string(),
            "assignment-2".to_string(),
            "assignment-3".to_string(),
        ],
    }
}

/// Three stops an hour apart: two for `client-a`, one for `client-b`.
pub fn sample_assignments(now: DateTime<Utc>) -> Vec<Assignment> {
    vec![
        Assignment {
            id: "assignment-1".to_string(),
            client_id: "client-a".to_string(),
            title: "Delivery to Main St".to_string(),
            description: "Package delivery to 123 Main St".to_string(),
            location: Location { latitude: 37.7749, longitude: -122.4194 },
            status: WorkStatus::Pending,
            scheduled_time: now,
            tasks: vec![
                Task::new("task-1-1", "Verify address", "Confirm the delivery address is correct")
                    .with_field(FormField::new("address", "Address", FormFieldKind::Text, true)),
                Task::new("task-1-2", "Deliver package", "Leave package at the door")
                    .with_photos(1)
                    .with_field(FormField::new("recipient", "Recipient Name", FormFieldKind::Text, false))
                    .with_field(FormField::new("photo", "Delivery Photo", FormFieldKind::Photo, true)),
            ],
        },
        Assignment {
            id: "assignment-2".to_string(),
            client_id: "client-a".to_string(),
            title: "Pickup from Oak Ave".to_string(),
            description: "Package pickup from 456 Oak Ave".to_string(),
            location: Location { latitude: 37.7833, longitude: -122.4167 },
            status: WorkStatus::Pending,
            scheduled_time: now + Duration::hours(1),
            tasks: vec![
                Task::new("task-2-1", "Confirm pickup", "Confirm the pickup details with the sender")
                    .with_field(FormField::new("sender", "Sender Name", FormFieldKind::Text, true))
                    .with_field(FormField::new("items", "Number of Items", FormFieldKind::Number, true)),
                Task::new("task-2-2", "Secure package", "Ensure package is properly secured for transport")
                    .with_photos(1)
                    .with_field(FormField::new("secured", "Package Secured", FormFieldKind::Checkbox, true))
                    .with_field(FormField::new("photo", "Package Photo", FormFieldKind::Photo, true)),
            ],
        },
        Assignment {
            id: "assignment-3".to_string(),
            client_id: "client-b".to_string(),
            title: "Service at Pine St".to_string(),
            description: "Equipment service at 789 Pine St".to_string(),
            location: Location { latitude: 37.79, longitude: -122.41 },
            status: WorkStatus::Pending,
            scheduled_time: now + Duration::hours(2),
            tasks: vec![
                Task::new("task-3-1", "Inspect equipment", "Check equipment for any visible damage")
                    .with_photos(2)
                    .with_field(FormField::new("equipment_id", "Equipment ID", FormFieldKind::Text, true))
                    .with_field(
                        FormField::new("condition", "Condition", FormFieldKind::Select, true)
                            .with_options(&["Good", "Fair", "Poor"]),
                    )
                    .with_field(FormField::new("photo1", "Equipment Photo 1", FormFieldKind::Photo, true))
                    .with_field(FormField::new("photo2", "Equipment Photo 2", FormFieldKind::Photo, true)),
                Task::new("task-3-2", "Perform service", "Complete the scheduled maintenance")
                    .with_photos(1)
                    .with_field(
                        FormField::new("service_type", "Service Performed", FormFieldKind::Select, true)
                            .with_options(&["Maintenance", "Repair", "Replacement"]),
                    )
                    .with_field(FormField::new("notes", "Service Notes", FormFieldKind::Text, true))
                    .with_field(FormField::new("photo", "After Service Photo", FormFieldKind::Photo, true)),
            ],
        },
    ]
}

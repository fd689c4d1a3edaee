pub mod appointment_repo;
pub mod booking_link_repo;
pub mod client_repo;
pub mod onboarding_draft_repo;
pub mod professional_repo;
pub mod profile_repo;
pub mod schedule_repo;
pub mod service_repo;
pub mod session_repo;
pub mod setup_repo;
pub mod user_repo;

pub use appointment_repo::AppointmentRepo;
pub use booking_link_repo::BookingLinkRepo;
pub use client_repo::ClientRepo;
pub use onboarding_draft_repo::OnboardingDraftRepo;
pub use professional_repo::ProfessionalRepo;
pub use profile_repo::ProfileRepo;
pub use schedule_repo::ScheduleRepo;
pub use service_repo::ServiceRepo;
pub use session_repo::SessionRepo;
pub use setup_repo::SetupRepo;
pub use user_repo::UserRepo;

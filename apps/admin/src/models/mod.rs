pub mod applicant;
pub mod inquiry;
pub mod notice;
pub mod resume;

pub use applicant::{Applicant, NewApplicant, NO_RESUME};
pub use inquiry::Inquiry;
pub use notice::{NewNotice, Notice};
pub use resume::{NewResumeImage, ResumeImage};

pub mod resume;

pub use resume::{
    EducationEntry, ExperienceEntry, ExperienceType, PersonalInfo, PolishedResumeData,
    ProfileType, RawResumeData,
};

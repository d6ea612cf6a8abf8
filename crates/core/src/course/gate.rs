//! About-page visibility and enrollment gate.
//!
//! [`evaluate`] turns a course's settings and the viewer's state into an
//! [`AboutDecision`]. Rules are checked in a fixed order and the first match
//! wins:
//!
//! 1. marketing site enabled: redirect to the course info page
//! 2. catalog visibility hides the course from this viewer: not found
//! 3. invitation only, viewer neither enrolled nor allow-listed
//! 4. outside the enrollment window, viewer not enrolled
//! 5. viewer enrolled
//! 6. paid course already in the viewer's cart
//! 7. enrollment cap reached
//! 8. registration control (free or add-to-cart)
//!
//! The gate never fails. An inverted enrollment window is not detected.

use super::settings::{CatalogVisibility, CourseMode, CourseSettings};
use crate::assets::key::CourseKey;
use crate::types::{DbId, Timestamp};

/// Shown next to the registration control for restricted enrollment domains.
pub const RESTRICTED_DOMAIN_NOTICE: &str =
    "The currently logged-in user account does not have permission to enroll in this course.";

/// Feature switches that change the about page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FeatureFlags {
    pub marketing_site: bool,
    pub paid_course_registration: bool,
    pub shopping_cart: bool,
    pub prerequisite_courses: bool,
    pub restrict_enroll_by_reg_method: bool,
}

impl FeatureFlags {
    /// Paid registration needs both the paywall and the cart.
    pub fn ecommerce_enabled(&self) -> bool {
        self.paid_course_registration && self.shopping_cart
    }
}

/// An authenticated viewer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewerIdentity {
    pub user_id: DbId,
    pub email: String,
    pub is_staff: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Viewer {
    Anonymous,
    User(ViewerIdentity),
}

impl Viewer {
    pub fn identity(&self) -> Option<&ViewerIdentity> {
        match self {
            Viewer::Anonymous => None,
            Viewer::User(identity) => Some(identity),
        }
    }

    pub fn is_staff(&self) -> bool {
        self.identity().is_some_and(|i| i.is_staff)
    }
}

/// The viewer's relationship to the course. All false for anonymous viewers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ViewerStatus {
    pub enrolled: bool,
    /// On the invitation allow-list.
    pub allowed: bool,
    pub in_cart: bool,
}

/// What the registration area of the about page shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Registration {
    InvitationOnly,
    EnrollmentClosed,
    AlreadyRegistered { courseware_url: String },
    InCart,
    CourseFull,
    Register { course_number: String },
    AddToCart { course_number: String, price: String },
}

impl Registration {
    /// Whether a registration control (button) is rendered.
    pub fn has_control(&self) -> bool {
        matches!(
            self,
            Registration::Register { .. } | Registration::AddToCart { .. }
        )
    }

    pub fn message(&self) -> String {
        match self {
            Registration::InvitationOnly => {
                "Enrollment in this course is by invitation only".to_string()
            }
            Registration::EnrollmentClosed => "Enrollment is Closed".to_string(),
            Registration::AlreadyRegistered { .. } => {
                "You are registered for this course".to_string()
            }
            Registration::InCart => "This course is in your cart.".to_string(),
            Registration::CourseFull => "Course is full".to_string(),
            Registration::Register { course_number } => format!("Register for {course_number}"),
            Registration::AddToCart {
                course_number,
                price,
            } => format!("Add {course_number} to Cart ({price})"),
        }
    }
}

/// Everything the about page renders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AboutPage {
    pub course_key: CourseKey,
    pub display_name: String,
    pub course_number: String,
    pub overview: String,
    pub registration: Registration,
    /// Price for the important-dates sidebar.
    pub sidebar_price: Option<String>,
    /// `org course` of each prerequisite.
    pub prerequisites: Vec<String>,
    pub restricted_domain_notice: Option<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AboutDecision {
    Redirect(String),
    NotFound,
    Render(Box<AboutPage>),
}

/// Inputs of one gate evaluation.
#[derive(Debug, Clone, Copy)]
pub struct GateContext<'a> {
    pub course: &'a CourseSettings,
    pub viewer: &'a Viewer,
    pub status: ViewerStatus,
    pub enrollment_count: u64,
    pub features: &'a FeatureFlags,
    pub now: Timestamp,
}

pub fn courseware_url(course: &CourseKey) -> String {
    format!("/courses/{}/courseware", course.url_segment())
}

pub fn info_url(course: &CourseKey) -> String {
    format!("/courses/{}/info", course.url_segment())
}

/// Whether the viewer may see the about page at all.
pub fn can_see_about_page(visibility: CatalogVisibility, viewer: &Viewer) -> bool {
    match visibility {
        CatalogVisibility::Both | CatalogVisibility::About => true,
        CatalogVisibility::None => viewer.is_staff(),
    }
}

pub fn evaluate(ctx: &GateContext<'_>) -> AboutDecision {
    let course = ctx.course;

    if ctx.features.marketing_site {
        return AboutDecision::Redirect(info_url(&course.key));
    }

    if !can_see_about_page(course.catalog_visibility, ctx.viewer) {
        return AboutDecision::NotFound;
    }

    let paid_mode: Option<&CourseMode> = if ctx.features.ecommerce_enabled() {
        course.paid_mode()
    } else {
        None
    };

    let registration = registration_for(ctx, paid_mode);

    let restricted_domain_notice = (registration.has_control()
        && ctx.features.restrict_enroll_by_reg_method
        && course.is_shib_course())
    .then_some(RESTRICTED_DOMAIN_NOTICE);

    let prerequisites = if ctx.features.prerequisite_courses {
        course
            .prerequisites
            .iter()
            .map(|p| format!("{} {}", p.org(), p.course()))
            .collect()
    } else {
        Vec::new()
    };

    AboutDecision::Render(Box::new(AboutPage {
        course_key: course.key.clone(),
        display_name: course.display_name.clone(),
        course_number: course.display_number().to_string(),
        overview: course.overview.clone(),
        registration,
        sidebar_price: paid_mode.map(CourseMode::formatted_price),
        prerequisites,
        restricted_domain_notice,
    }))
}

fn registration_for(ctx: &GateContext<'_>, paid_mode: Option<&CourseMode>) -> Registration {
    let course = ctx.course;
    let status = ctx.status;

    if course.invitation_only && !status.enrolled && !status.allowed {
        return Registration::InvitationOnly;
    }

    if !status.enrolled && !course.enrollment_open(ctx.now) {
        return Registration::EnrollmentClosed;
    }

    if status.enrolled {
        return Registration::AlreadyRegistered {
            courseware_url: courseware_url(&course.key),
        };
    }

    if paid_mode.is_some() && status.in_cart {
        return Registration::InCart;
    }

    if course
        .max_student_enrollments_allowed
        .is_some_and(|cap| ctx.enrollment_count >= cap)
    {
        return Registration::CourseFull;
    }

    let course_number = course.display_number().to_string();
    match paid_mode {
        Some(mode) => Registration::AddToCart {
            course_number,
            price: mode.formatted_price(),
        },
        None => Registration::Register { course_number },
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};

    use super::*;
    use crate::course::settings::CourseMode;

    fn buyme() -> CourseSettings {
        CourseSettings::new(
            CourseKey::new("MITx", "buyme", "2014").unwrap(),
            "Course To Buy",
        )
    }

    fn paid(mut course: CourseSettings) -> CourseSettings {
        course.modes.push(CourseMode::honor(10));
        course
    }

    fn ecommerce() -> FeatureFlags {
        FeatureFlags {
            paid_course_registration: true,
            shopping_cart: true,
            ..FeatureFlags::default()
        }
    }

    fn user() -> Viewer {
        Viewer::User(ViewerIdentity {
            user_id: 1,
            email: "student@test.com".into(),
            is_staff: false,
        })
    }

    fn staff() -> Viewer {
        Viewer::User(ViewerIdentity {
            user_id: 2,
            email: "staff@test.com".into(),
            is_staff: true,
        })
    }

    fn page(
        course: &CourseSettings,
        viewer: &Viewer,
        status: ViewerStatus,
        count: u64,
        features: &FeatureFlags,
    ) -> AboutPage {
        let ctx = GateContext {
            course,
            viewer,
            status,
            enrollment_count: count,
            features,
            now: Utc::now(),
        };
        match evaluate(&ctx) {
            AboutDecision::Render(page) => *page,
            other => panic!("expected rendered page, got {other:?}"),
        }
    }

    fn decide(course: &CourseSettings, viewer: &Viewer, features: &FeatureFlags) -> AboutDecision {
        evaluate(&GateContext {
            course,
            viewer,
            status: ViewerStatus::default(),
            enrollment_count: 0,
            features,
            now: Utc::now(),
        })
    }

    fn closed(mut course: CourseSettings) -> CourseSettings {
        let tomorrow = Utc::now() + Duration::days(1);
        course.enrollment_start = Some(tomorrow);
        course.enrollment_end = Some(tomorrow + Duration::days(1));
        course
    }

    #[test]
    fn anonymous_sees_register_control() {
        let p = page(&buyme(), &Viewer::Anonymous, ViewerStatus::default(), 0, &FeatureFlags::default());
        assert_eq!(
            p.registration,
            Registration::Register {
                course_number: "buyme".into()
            }
        );
        assert!(p.registration.has_control());
        assert!(p.sidebar_price.is_none());
    }

    #[test]
    fn enrolled_sees_courseware_link() {
        let status = ViewerStatus {
            enrolled: true,
            ..ViewerStatus::default()
        };
        let p = page(&buyme(), &user(), status, 1, &FeatureFlags::default());
        assert_eq!(
            p.registration,
            Registration::AlreadyRegistered {
                courseware_url: "/courses/course-v1:MITx+buyme+2014/courseware".into()
            }
        );
    }

    #[test]
    fn hidden_course_is_not_found_except_for_staff() {
        let mut course = buyme();
        course.catalog_visibility = CatalogVisibility::None;
        assert_eq!(
            decide(&course, &Viewer::Anonymous, &FeatureFlags::default()),
            AboutDecision::NotFound
        );
        assert_eq!(decide(&course, &user(), &FeatureFlags::default()), AboutDecision::NotFound);
        assert!(matches!(
            decide(&course, &staff(), &FeatureFlags::default()),
            AboutDecision::Render(_)
        ));

        course.catalog_visibility = CatalogVisibility::About;
        assert!(matches!(
            decide(&course, &Viewer::Anonymous, &FeatureFlags::default()),
            AboutDecision::Render(_)
        ));
    }

    #[test]
    fn marketing_site_redirects_to_info() {
        let features = FeatureFlags {
            marketing_site: true,
            ..FeatureFlags::default()
        };
        assert_eq!(
            decide(&buyme(), &user(), &features),
            AboutDecision::Redirect("/courses/course-v1:MITx+buyme+2014/info".into())
        );
    }

    #[test]
    fn invitation_only_hides_control() {
        let mut course = buyme();
        course.invitation_only = true;
        let p = page(&course, &Viewer::Anonymous, ViewerStatus::default(), 0, &FeatureFlags::default());
        assert_eq!(p.registration, Registration::InvitationOnly);
        assert!(!p.registration.has_control());
    }

    #[test]
    fn invitation_only_but_allowed_can_register() {
        let mut course = buyme();
        course.invitation_only = true;
        let status = ViewerStatus {
            allowed: true,
            ..ViewerStatus::default()
        };
        let p = page(&course, &user(), status, 0, &FeatureFlags::default());
        assert_eq!(p.registration.message(), "Register for buyme");
    }

    #[test]
    fn invitation_only_beats_paywall() {
        let mut course = paid(buyme());
        course.invitation_only = true;
        let p = page(&course, &user(), ViewerStatus::default(), 0, &ecommerce());
        assert_eq!(p.registration, Registration::InvitationOnly);
    }

    #[test]
    fn invitation_only_beats_capacity() {
        let mut course = buyme();
        course.invitation_only = true;
        course.max_student_enrollments_allowed = Some(1);
        let p = page(&course, &user(), ViewerStatus::default(), 1, &FeatureFlags::default());
        assert_eq!(p.registration, Registration::InvitationOnly);
    }

    #[test]
    fn closed_enrollment_hides_control() {
        let p = page(&closed(buyme()), &Viewer::Anonymous, ViewerStatus::default(), 0, &FeatureFlags::default());
        assert_eq!(p.registration, Registration::EnrollmentClosed);
        assert!(p.sidebar_price.is_none());
    }

    #[test]
    fn closed_paid_course_keeps_sidebar_price() {
        let p = page(&closed(paid(buyme())), &user(), ViewerStatus::default(), 0, &ecommerce());
        assert_eq!(p.registration, Registration::EnrollmentClosed);
        assert_eq!(p.sidebar_price.as_deref(), Some("$10"));
    }

    #[test]
    fn closed_enrollment_does_not_beat_enrolled() {
        let status = ViewerStatus {
            enrolled: true,
            ..ViewerStatus::default()
        };
        let p = page(&closed(buyme()), &user(), status, 1, &FeatureFlags::default());
        assert!(matches!(p.registration, Registration::AlreadyRegistered { .. }));
    }

    #[test]
    fn paid_course_add_to_cart() {
        let p = page(&paid(buyme()), &Viewer::Anonymous, ViewerStatus::default(), 0, &ecommerce());
        assert_eq!(p.registration.message(), "Add buyme to Cart ($10)");
    }

    #[test]
    fn paid_course_without_ecommerce_is_free() {
        let p = page(&paid(buyme()), &user(), ViewerStatus::default(), 0, &FeatureFlags::default());
        assert_eq!(p.registration.message(), "Register for buyme");
        assert!(p.sidebar_price.is_none());
    }

    #[test]
    fn already_in_cart() {
        let status = ViewerStatus {
            in_cart: true,
            ..ViewerStatus::default()
        };
        let p = page(&paid(buyme()), &user(), status, 0, &ecommerce());
        assert_eq!(p.registration, Registration::InCart);
        assert!(p.registration.message().starts_with("This course is in your"));
    }

    #[test]
    fn enrolled_beats_paywall() {
        let status = ViewerStatus {
            enrolled: true,
            in_cart: true,
            ..ViewerStatus::default()
        };
        let p = page(&paid(buyme()), &user(), status, 1, &ecommerce());
        assert!(matches!(p.registration, Registration::AlreadyRegistered { .. }));
    }

    #[test]
    fn capacity_reached_shows_full() {
        let mut course = paid(buyme());
        course.max_student_enrollments_allowed = Some(1);

        let p = page(&course, &user(), ViewerStatus::default(), 0, &ecommerce());
        assert_eq!(p.registration.message(), "Add buyme to Cart ($10)");

        let p = page(&course, &user(), ViewerStatus::default(), 1, &ecommerce());
        assert_eq!(p.registration, Registration::CourseFull);
        assert!(!p.registration.has_control());
    }

    #[test]
    fn restricted_domain_notice() {
        let mut course = buyme();
        course.enrollment_domain = Some("shib:https://idp.stanford.edu/".into());
        let features = FeatureFlags {
            restrict_enroll_by_reg_method: true,
            ..FeatureFlags::default()
        };
        let p = page(&course, &Viewer::Anonymous, ViewerStatus::default(), 0, &features);
        assert!(p.registration.has_control());
        assert_eq!(p.restricted_domain_notice, Some(RESTRICTED_DOMAIN_NOTICE));

        let p = page(&course, &user(), ViewerStatus::default(), 0, &FeatureFlags::default());
        assert!(p.restricted_domain_notice.is_none());
    }

    #[test]
    fn prerequisites_listed_when_enabled() {
        let mut course = buyme();
        course
            .prerequisites
            .push(CourseKey::new("edX", "900", "2014").unwrap());
        let features = FeatureFlags {
            prerequisite_courses: true,
            ..FeatureFlags::default()
        };
        let p = page(&course, &user(), ViewerStatus::default(), 0, &features);
        assert_eq!(p.prerequisites, ["edX 900"]);

        let p = page(&course, &user(), ViewerStatus::default(), 0, &FeatureFlags::default());
        assert!(p.prerequisites.is_empty());
    }
}

//! Course about page.

use std::fmt::Write;

use courseware_core::course::gate::{AboutPage, Registration};

use super::{escape_html, page};

/// Render the about page. The course overview is trusted HTML.
pub fn render_about_page(about: &AboutPage) -> String {
    let mut body = String::new();
    let segment = about.course_key.url_segment();

    let _ = write!(
        body,
        "<section class=\"course-info\">\n<header class=\"course-profile\">\n\
         <h1>{} <span class=\"course-number\">{}</span></h1>\n</header>\n",
        escape_html(&about.display_name),
        escape_html(&about.course_number),
    );

    body.push_str("<div class=\"main-cta\">\n");
    body.push_str(&registration_html(&about.registration, &segment));
    if let Some(notice) = about.restricted_domain_notice {
        let _ = writeln!(body, "<p class=\"shib-notice\">{}</p>", escape_html(notice));
    }
    body.push_str("</div>\n");

    let _ = writeln!(body, "<div class=\"overview\">{}</div>", about.overview);

    body.push_str("<aside class=\"course-sidebar\">\n<ol class=\"important-dates\">\n");
    let _ = writeln!(
        body,
        "<li class=\"important-dates-item\"><p class=\"important-dates-item-title\">Course Number</p>\
         <span class=\"important-dates-item-text course-number\">{}</span></li>",
        escape_html(&about.course_number),
    );
    for prerequisite in &about.prerequisites {
        let _ = writeln!(
            body,
            "<li class=\"prerequisite-course\"><p class=\"important-dates-item-title\">Prerequisites</p>\
             <span class=\"important-dates-item-text prerequisite-course-key\">{}</span></li>",
            escape_html(prerequisite),
        );
    }
    if let Some(price) = &about.sidebar_price {
        let _ = writeln!(
            body,
            "<li class=\"important-dates-item\"><p class=\"important-dates-item-title\">Price</p>\
             <span class=\"important-dates-item-text\">{}</span></li>",
            escape_html(price),
        );
    }
    body.push_str("</ol>\n</aside>\n</section>");

    page(&about.display_name, &body)
}

fn registration_html(registration: &Registration, course_segment: &str) -> String {
    let message = escape_html(&registration.message());
    match registration {
        Registration::Register { .. } => format!(
            "<form id=\"class_enroll_form\" method=\"post\" \
             action=\"/api/v1/courses/{course_segment}/enrollment\">\n\
             <a href=\"#\" class=\"register\">{message}</a>\n</form>\n"
        ),
        Registration::AddToCart { .. } => {
            format!("<a href=\"#\" class=\"add-to-cart\">{message}</a>\n")
        }
        Registration::AlreadyRegistered { courseware_url } => format!(
            "<span class=\"register disabled\">{message}</span>\n\
             <a href=\"{}\"><strong>View Courseware</strong></a>\n",
            escape_html(courseware_url)
        ),
        Registration::InCart => "<span class=\"add-to-cart\">This course is in your \
             <a href=\"/shoppingcart/\">cart</a>.</span>\n"
            .to_string(),
        Registration::InvitationOnly
        | Registration::EnrollmentClosed
        | Registration::CourseFull => {
            format!("<span class=\"register disabled\">{message}</span>\n")
        }
    }
}

#[cfg(test)]
mod tests {
    use courseware_core::assets::key::CourseKey;

    use super::*;

    fn about(registration: Registration) -> AboutPage {
        AboutPage {
            course_key: CourseKey::new("MITx", "buyme", "2014").unwrap(),
            display_name: "Course <To> Buy".into(),
            course_number: "buyme".into(),
            overview: "<p>Overview</p>".into(),
            registration,
            sidebar_price: None,
            prerequisites: Vec::new(),
            restricted_domain_notice: None,
        }
    }

    #[test]
    fn register_renders_enroll_form() {
        let html = render_about_page(&about(Registration::Register {
            course_number: "buyme".into(),
        }));
        assert!(html.contains("id=\"class_enroll_form\""));
        assert!(html.contains("/api/v1/courses/course-v1:MITx+buyme+2014/enrollment"));
        assert!(html.contains("Register for buyme"));
        assert!(html.contains("Course &lt;To&gt; Buy"));
        assert!(html.contains("<p>Overview</p>"));
    }

    #[test]
    fn closed_renders_no_form() {
        let html = render_about_page(&about(Registration::EnrollmentClosed));
        assert!(html.contains("Enrollment is Closed"));
        assert!(!html.contains("class_enroll_form"));
    }

    #[test]
    fn sidebar_price_and_prerequisites() {
        let mut page = about(Registration::EnrollmentClosed);
        page.sidebar_price = Some("$10".into());
        page.prerequisites = vec!["edX 900".into()];
        let html = render_about_page(&page);
        assert!(html.contains("<span class=\"important-dates-item-text\">$10</span>"));
        assert!(html.contains(
            "<span class=\"important-dates-item-text prerequisite-course-key\">edX 900</span>"
        ));
    }
}

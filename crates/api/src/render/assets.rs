//! "Files & Uploads" HTML listing.

use std::fmt::Write;

use courseware_core::assets::key::CourseKey;

use super::{escape_html, page};
use crate::response::AssetListResponse;

/// Render one page of a course's assets as an HTML table.
pub fn render_asset_index(
    course: &CourseKey,
    listing: &AssetListResponse,
    max_upload_bytes: u64,
) -> String {
    let upload_url = format!("/api/v1/courses/{}/assets", course.url_segment());
    let mut body = String::new();

    let _ = write!(
        body,
        "<h1>Files &amp; Uploads</h1>\n\
         <form class=\"upload\" method=\"post\" enctype=\"multipart/form-data\" action=\"{}\" \
         data-max-file-size-in-mbs=\"{}\">\n\
         <input type=\"file\" name=\"file\">\n</form>\n",
        escape_html(&upload_url),
        max_upload_bytes / 1_000_000,
    );

    let _ = writeln!(
        body,
        "<p class=\"asset-count\">Showing {}-{} out of {} total, sorted by {}</p>",
        if listing.assets.is_empty() { 0 } else { listing.start + 1 },
        listing.end,
        listing.total_count,
        listing.sort,
    );

    body.push_str(
        "<table class=\"assets\">\n<thead><tr><th>Name</th><th>Date Added</th>\
         <th>URL</th><th>Locked</th></tr></thead>\n<tbody>\n",
    );
    for asset in &listing.assets {
        let _ = writeln!(
            body,
            "<tr data-id=\"{}\"><td><a href=\"{}\">{}</a></td><td>{}</td>\
             <td><code>{}</code></td><td>{}</td></tr>",
            escape_html(&asset.id),
            escape_html(&asset.url),
            escape_html(&asset.display_name),
            escape_html(&asset.date_added),
            escape_html(&asset.portable_url),
            if asset.locked { "yes" } else { "no" },
        );
    }
    body.push_str("</tbody>\n</table>");

    page("Files & Uploads", &body)
}

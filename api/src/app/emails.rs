//! Outbound e-mail bodies

use crate::domain::ports::OutboundEmail;

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Confirmation sent to a candidate after applying through a career page
pub fn application_received(
    to: &str,
    candidate_name: &str,
    job_title: &str,
    organization_name: &str,
) -> OutboundEmail {
    OutboundEmail {
        to: to.to_string(),
        subject: format!("We received your application for {}", job_title),
        html: format!(
            "<p>Hi {},</p><p>Thanks for applying for <strong>{}</strong> at {}. \
             The team will review your application and get back to you.</p>",
            escape_html(candidate_name),
            escape_html(job_title),
            escape_html(organization_name),
        ),
    }
}

pub fn team_invitation(
    to: &str,
    organization_name: &str,
    role: &str,
    accept_url: &str,
) -> OutboundEmail {
    OutboundEmail {
        to: to.to_string(),
        subject: format!("You've been invited to join {}", organization_name),
        html: format!(
            "<p>You have been invited to join <strong>{}</strong> as {}.</p>\
             <p><a href=\"{}\">Accept the invitation</a></p>\
             <p>This link expires in 7 days.</p>",
            escape_html(organization_name),
            escape_html(role),
            escape_html(accept_url),
        ),
    }
}

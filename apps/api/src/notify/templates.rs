use crate::models::candidate::Candidate;

/// Subject and plain-text body of one notification email.
#[derive(Debug, Clone, PartialEq)]
pub struct EmailContent {
    pub subject: String,
    pub body: String,
}

pub fn is_shortlisted(candidate: &Candidate, threshold: f64) -> bool {
    candidate.match_score >= threshold
}

/// Picks the shortlist or rejection message for a candidate.
pub fn compose(candidate: &Candidate, threshold: f64) -> EmailContent {
    if is_shortlisted(candidate, threshold) {
        shortlist_email(candidate)
    } else {
        rejection_email(candidate, threshold)
    }
}

fn shortlist_email(candidate: &Candidate) -> EmailContent {
    let matched = if candidate.matched_skills.is_empty() {
        "none"
    } else {
        candidate.matched_skills.as_str()
    };

    EmailContent {
        subject: "Resume Shortlisted".to_string(),
        body: format!(
            "Hi {},\n\n\
             Congratulations! Your resume has been shortlisted for our position.\n\n\
             Your matching score: {:.1}%\n\
             Matched skills: {}\n\n\
             We'll contact you soon with next steps.\n\n\
             Best regards,\nHR Team",
            candidate.name, candidate.match_score, matched
        ),
    }
}

fn rejection_email(candidate: &Candidate, threshold: f64) -> EmailContent {
    EmailContent {
        subject: "Application Update - Thank You".to_string(),
        body: format!(
            "Hi {},\n\n\
             Thank you for applying. After evaluating your resume, \
             your score was {:.1}%, which is below our shortlisting threshold of {:.1}%.\n\n\
             Although you were not shortlisted this time, we truly appreciate your interest \
             and encourage you to apply for future opportunities with us.\n\n\
             Best regards,\nHR Team",
            candidate.name, candidate.match_score, threshold
        ),
    }
}

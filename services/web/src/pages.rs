use pioneer_site::views::{layout, SITE_NAME};

/// Informational pages with fixed content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum StaticPage {
    Home,
    About,
    LoanProducts,
    Requirements,
    Faq,
    ThankYou,
}

impl StaticPage {
    pub(crate) const ALL: [StaticPage; 6] = [
        StaticPage::Home,
        StaticPage::About,
        StaticPage::LoanProducts,
        StaticPage::Requirements,
        StaticPage::Faq,
        StaticPage::ThankYou,
    ];

    pub(crate) fn path(&self) -> &'static str {
        match self {
            StaticPage::Home => "/",
            StaticPage::About => "/about",
            StaticPage::LoanProducts => "/loan-products",
            StaticPage::Requirements => "/requirements",
            StaticPage::Faq => "/faq",
            StaticPage::ThankYou => pioneer_site::intake::CONFIRMATION_PATH,
        }
    }

    pub(crate) fn heading(&self) -> &'static str {
        match self {
            StaticPage::Home => "Welcome",
            StaticPage::About => "About us",
            StaticPage::LoanProducts => "Loan products",
            StaticPage::Requirements => "Requirements",
            StaticPage::Faq => "Frequently asked questions",
            StaticPage::ThankYou => "Thank you",
        }
    }

    fn body(&self) -> &'static str {
        match self {
            StaticPage::Home => {
                "<p>Fair, transparent loans for members of the service community.</p>\n\
                 <p><a href=\"/apply\">Start an application</a> or \
                 <a href=\"/loan-products\">compare our products</a>.</p>"
            }
            StaticPage::About => {
                "<p>We are a member-owned cooperative lending to public servants and \
                 their families. Decisions are made locally by our loan committee.</p>"
            }
            StaticPage::LoanProducts => {
                "<ul>\n<li><strong>Salary advance</strong>: short-term support repaid from \
                 your next pay cycles.</li>\n<li><strong>Personal loan</strong>: fixed \
                 monthly repayments over up to 36 months.</li>\n<li><strong>Education \
                 loan</strong>: tuition and fees for you or a dependant.</li>\n</ul>"
            }
            StaticPage::Requirements => {
                "<ul>\n<li>Valid identification and proof of date of birth</li>\n\
                 <li>Recent service or employment documents</li>\n\
                 <li>Highest academic qualification</li>\n\
                 <li>A guarantor with a verifiable occupation</li>\n</ul>"
            }
            StaticPage::Faq => {
                "<dl>\n<dt>How long does a decision take?</dt>\n<dd>Most applications \
                 are reviewed within five working days.</dd>\n<dt>Do I need a \
                 guarantor?</dt>\n<dd>A guarantor is recommended and may be required for \
                 larger amounts.</dd>\n<dt>How will I hear back?</dt>\n<dd>A loan \
                 officer will contact you by email or phone.</dd>\n</dl>"
            }
            StaticPage::ThankYou => {
                "<p>Your submission has been received. We will be in touch soon.</p>\n\
                 <p><a href=\"/\">Return to the home page</a></p>"
            }
        }
    }
}

pub(crate) fn render(page: StaticPage) -> String {
    let title = match page {
        StaticPage::Home => SITE_NAME,
        other => other.heading(),
    };
    layout(title, &format!("<h1>{}</h1>\n{}", page.heading(), page.body()))
}

pub(crate) fn not_found() -> String {
    layout(
        "Page not found",
        "<h1>Page not found</h1>\n<p><a href=\"/\">Return to the home page</a></p>",
    )
}

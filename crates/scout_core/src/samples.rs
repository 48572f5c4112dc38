//! Built-in demo rows shown when sample data is switched on and the real
//! collections are still empty.

use crate::{Contact, ContactId, SuggestedUrl};

struct SampleContact {
    name: &'static str,
    email: &'static str,
    company: &'static str,
    role: &'static str,
    source_url: &'static str,
    status: &'static str,
}

const SAMPLE_CONTACTS: [SampleContact; 5] = [
    SampleContact {
        name: "Sarah Chen",
        email: "sarah.chen@morganstanley.com",
        company: "Morgan Stanley",
        role: "Senior Equity Analyst",
        source_url: "https://morganstanley.com/team",
        status: "found",
    },
    SampleContact {
        name: "James Rodriguez",
        email: "j.rodriguez@goldmansachs.com",
        company: "Goldman Sachs",
        role: "VP Research",
        source_url: "https://goldmansachs.com/research",
        status: "found",
    },
    SampleContact {
        name: "Emily Watkins",
        email: "e.watkins@jpmorgan.com",
        company: "JP Morgan",
        role: "Credit Analyst",
        source_url: "https://jpmorgan.com/analysts",
        status: "found",
    },
    SampleContact {
        name: "Michael Tanaka",
        email: "",
        company: "Barclays Capital",
        role: "Quantitative Analyst",
        source_url: "https://barclays.com/team",
        status: "partial",
    },
    SampleContact {
        name: "Lisa Okonkwo",
        email: "l.okonkwo@blackrock.com",
        company: "BlackRock",
        role: "Portfolio Analyst",
        source_url: "https://blackrock.com/about",
        status: "found",
    },
];

struct SampleSuggestion {
    url: &'static str,
    site_name: &'static str,
    description: &'static str,
    estimated_contacts: u64,
}

const SAMPLE_SUGGESTIONS: [SampleSuggestion; 3] = [
    SampleSuggestion {
        url: "https://morganstanley.com/people",
        site_name: "Morgan Stanley",
        description: "Team directory with equity research analysts and portfolio managers",
        estimated_contacts: 45,
    },
    SampleSuggestion {
        url: "https://goldmansachs.com/our-firm/people",
        site_name: "Goldman Sachs",
        description: "Senior leadership and research team profiles",
        estimated_contacts: 30,
    },
    SampleSuggestion {
        url: "https://jpmorgan.com/research/analysts",
        site_name: "JP Morgan",
        description: "Global research analyst directory",
        estimated_contacts: 55,
    },
];

pub(crate) fn sample_contacts() -> Vec<Contact> {
    SAMPLE_CONTACTS
        .iter()
        .zip(1u64..)
        .map(|(sample, id)| Contact {
            id: ContactId(id),
            name: sample.name.to_string(),
            email: sample.email.to_string(),
            company: sample.company.to_string(),
            role: sample.role.to_string(),
            source_url: sample.source_url.to_string(),
            status: sample.status.to_string(),
        })
        .collect()
}

pub(crate) fn sample_suggestions() -> Vec<SuggestedUrl> {
    SAMPLE_SUGGESTIONS
        .iter()
        .map(|sample| SuggestedUrl {
            url: sample.url.to_string(),
            site_name: sample.site_name.to_string(),
            description: sample.description.to_string(),
            estimated_contacts: sample.estimated_contacts,
        })
        .collect()
}

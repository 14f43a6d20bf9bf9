//! Fixed five-step outreach sequences.
//!
//! One sequence per lead type, each step carrying a distinct persuasion
//! strategy: hook, social proof, ROI, urgency, breakup. The template stage
//! is the floor the AI stage falls back onto, so nothing here may fail.

use std::collections::HashMap;

use crate::lead::{LeadDetails, LeadType};
use crate::substitute::substitute;

/// One step of a sequence. The subject is a placeholder template; the body
/// is a function so it can branch on the lead's fields directly.
pub(crate) struct SequenceStep {
    pub strategy: &'static str,
    subject: &'static str,
    body: fn(&LeadDetails) -> String,
}

impl SequenceStep {
    pub fn render(&self, lead: &LeadDetails) -> (String, String) {
        (substitute(self.subject, &subject_values(lead)), (self.body)(lead))
    }
}

/// Values available to subject templates. Both alias sets are populated so
/// subjects can use whichever token name reads better.
fn subject_values(lead: &LeadDetails) -> HashMap<&'static str, String> {
    let mut values = HashMap::new();
    values.insert("name", lead.greeting_name());
    values.insert("company", lead.org_name());
    values.insert("university", lead.org_name());
    values.insert("city", lead.city_name());
    values.insert("units", lead.volume().to_string());
    values.insert("relocations", lead.volume().to_string());
    values
}

/// The step for `email_number`, clamping anything past the end of the
/// sequence to the final (breakup) step.
pub(crate) fn step_for(lead_type: LeadType, email_number: usize) -> &'static SequenceStep {
    let sequence = sequence_for(lead_type);
    let index = email_number.saturating_sub(1).min(sequence.len() - 1);
    &sequence[index]
}

fn sequence_for(lead_type: LeadType) -> &'static [SequenceStep; 5] {
    match lead_type {
        LeadType::Landlord => &LANDLORD_SEQUENCE,
        LeadType::Employer => &EMPLOYER_SEQUENCE,
        LeadType::University => &UNIVERSITY_SEQUENCE,
    }
}

static LANDLORD_SEQUENCE: [SequenceStep; 5] = [
    SequenceStep {
        strategy: "hook",
        subject: "Pre-screened relocation tenants for your ${city} units",
        body: |lead| {
            format!(
                "Hi {},\n\nRelo places employees and students relocating to {} \
into housing before they arrive. Tenants come pre-screened with employer or \
university backing, and leases are signed sight-unseen through our platform.\n\n\
Would it be worth a short call to see if your portfolio is a fit?\n\n\
Best,\nThe Relo Partnerships Team",
                lead.greeting_name(),
                lead.city_name()
            )
        },
    },
    SequenceStep {
        strategy: "social proof",
        subject: "How {{city}} landlords fill vacancies before listing day",
        body: |lead| {
            format!(
                "Hi {},\n\nLandlords on Relo in {} report filling vacancies in \
under two weeks on average, because relocating tenants commit before they land. \
One partner with a portfolio about the size of yours cut their vacancy losses \
by a third in the first year.\n\nHappy to share the numbers if useful.\n\n\
Best,\nThe Relo Partnerships Team",
                lead.greeting_name(),
                lead.city_name()
            )
        },
    },
    SequenceStep {
        strategy: "roi",
        subject: "The math on {{units}} units with zero listing spend",
        body: |lead| {
            format!(
                "Hi {},\n\nA quick back-of-the-envelope for {} units: every week \
of vacancy you avoid is roughly a quarter of a month's rent recovered, and Relo \
tenants arrive with a move-in date already fixed. No listing fees, no showings, \
no gap between leases.\n\nI can run the projection against your actual rents \
if you send me a range.\n\nBest,\nThe Relo Partnerships Team",
                lead.greeting_name(),
                lead.volume()
            )
        },
    },
    SequenceStep {
        strategy: "urgency",
        subject: "Relocation demand in ${city} peaks in the next 60 days",
        body: |lead| {
            format!(
                "Hi {},\n\nCorporate start dates and semester move-ins cluster \
hard, and {} is one of the markets where we currently have more incoming \
tenants than partnered units. Portfolios onboarded this month get matched \
first.\n\nCan we get you set up before the wave hits?\n\n\
Best,\nThe Relo Partnerships Team",
                lead.greeting_name(),
                lead.city_name()
            )
        },
    },
    SequenceStep {
        strategy: "breakup",
        subject: "Closing the file on {{company}}",
        body: |lead| {
            format!(
                "Hi {},\n\nI haven't heard back, so I'll assume the timing isn't \
right and stop reaching out. If vacancies ever start costing more than they \
should, the door is open.\n\nAll the best,\nThe Relo Partnerships Team",
                lead.greeting_name()
            )
        },
    },
];

static EMPLOYER_SEQUENCE: [SequenceStep; 5] = [
    SequenceStep {
        strategy: "hook",
        subject: "Softer landings for {{company}} new hires",
        body: |lead| {
            format!(
                "Hi {},\n\nRelo handles the housing half of relocation: your \
incoming hires get matched to vetted rentals in their new city before day one, \
with leases and deposits handled on-platform. HR gets a dashboard instead of \
a forwarding inbox.\n\nWorth fifteen minutes to see how {} could use it?\n\n\
Best,\nThe Relo Partnerships Team",
                lead.greeting_name(),
                lead.org_name()
            )
        },
    },
    SequenceStep {
        strategy: "social proof",
        subject: "What employers like {{company}} changed about relocation",
        body: |lead| {
            format!(
                "Hi {},\n\nEmployers using Relo report new hires signing leases \
two to three weeks earlier and far fewer first-month escalations to HR. One \
logistics firm moving a similar volume of people now routes every relocation \
through the platform.\n\nI can intro you to their people-ops lead if a \
reference helps.\n\nBest,\nThe Relo Partnerships Team",
                lead.greeting_name()
            )
        },
    },
    SequenceStep {
        strategy: "roi",
        subject: "The hidden cost of {{relocations}} relocations a year",
        body: |lead| {
            format!(
                "Hi {},\n\nAt roughly {} relocations a year, even a one-week \
delay in each hire getting settled adds up to months of lost ramp time. Relo \
compresses the housing search to days and takes the lease paperwork off your \
team entirely.\n\nHappy to put real numbers on that for your volume.\n\n\
Best,\nThe Relo Partnerships Team",
                lead.greeting_name(),
                lead.volume()
            )
        },
    },
    SequenceStep {
        strategy: "urgency",
        subject: "Before your next start-date cohort hits",
        body: |lead| {
            format!(
                "Hi {},\n\nIf {} has a hiring cohort starting in the next \
quarter, this is the window to set relocation up properly; onboarding the \
platform takes about a week and the first moves can run through it \
immediately.\n\nShould we aim for that?\n\nBest,\nThe Relo Partnerships Team",
                lead.greeting_name(),
                lead.org_name()
            )
        },
    },
    SequenceStep {
        strategy: "breakup",
        subject: "Last note from me, {{name}}",
        body: |lead| {
            format!(
                "Hi {},\n\nI'll stop here rather than keep adding to your inbox. \
If relocation ever becomes the thing HR complains about most, you know where \
to find us.\n\nAll the best,\nThe Relo Partnerships Team",
                lead.greeting_name()
            )
        },
    },
];

static UNIVERSITY_SEQUENCE: [SequenceStep; 5] = [
    SequenceStep {
        strategy: "hook",
        subject: "Off-campus housing support for {{university}} students",
        body: |lead| {
            format!(
                "Hi {},\n\nRelo partners with university housing offices to \
place incoming students in vetted off-campus rentals before they arrive, with \
guarantor-free leases and verified landlords. Your office gets visibility \
without taking on the inventory.\n\nCould we walk {} through the program?\n\n\
Best,\nThe Relo Partnerships Team",
                lead.greeting_name(),
                lead.org_name()
            )
        },
    },
    SequenceStep {
        strategy: "social proof",
        subject: "How partner universities guarantee off-campus housing",
        body: |lead| {
            format!(
                "Hi {},\n\nSeveral partner housing offices now point every \
student who misses the residence-hall lottery at Relo, and their fall \
escalation volume dropped noticeably the first year. Flagship partners go \
further and co-brand a housing guarantee.\n\nI can share how each tier \
works.\n\nBest,\nThe Relo Partnerships Team",
                lead.greeting_name()
            )
        },
    },
    SequenceStep {
        strategy: "roi",
        subject: "Fewer housing escalations reaching your office",
        body: |lead| {
            format!(
                "Hi {},\n\nEvery student who lands housing before arrival is one \
less emergency case in August. For an incoming class around {} students, even \
a small shift off-campus through a vetted channel is hundreds of staff hours \
back.\n\nWant the one-page summary for your director?\n\n\
Best,\nThe Relo Partnerships Team",
                lead.greeting_name(),
                lead.volume()
            )
        },
    },
    SequenceStep {
        strategy: "urgency",
        subject: "Ahead of move-in season at {{university}}",
        body: |lead| {
            format!(
                "Hi {},\n\nPartnerships signed before admissions decisions go \
out can be included in the admitted-student packet, which is where most of the \
adoption comes from. After that window the program still works, it just \
reaches fewer students.\n\nShall we try to make the packet?\n\n\
Best,\nThe Relo Partnerships Team",
                lead.greeting_name()
            )
        },
    },
    SequenceStep {
        strategy: "breakup",
        subject: "Should I close the file on {{university}}?",
        body: |lead| {
            format!(
                "Hi {},\n\nI don't want to clutter your inbox through the busy \
season, so this is my last note. If off-campus housing becomes a priority for \
{}, we'd still be glad to help.\n\nAll the best,\nThe Relo Partnerships Team",
                lead.greeting_name(),
                lead.org_name()
            )
        },
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    const STRATEGIES: [&str; 5] = ["hook", "social proof", "roi", "urgency", "breakup"];

    #[test]
    fn test_every_sequence_walks_the_five_strategies() {
        for lead_type in [LeadType::Landlord, LeadType::Employer, LeadType::University] {
            for (n, expected) in STRATEGIES.iter().enumerate() {
                assert_eq!(step_for(lead_type, n + 1).strategy, *expected);
            }
        }
    }

    #[test]
    fn test_overflow_clamps_to_breakup_step() {
        assert_eq!(step_for(LeadType::Landlord, 6).strategy, "breakup");
        assert_eq!(step_for(LeadType::Employer, 99).strategy, "breakup");
        // Degenerate zero clamps to the first step instead of underflowing.
        assert_eq!(step_for(LeadType::University, 0).strategy, "hook");
    }

    #[test]
    fn test_rendered_steps_never_leak_placeholder_tokens() {
        let empty = LeadDetails::default();
        let full = LeadDetails {
            name: "Dana Reyes".to_string(),
            company: "Reyes Properties".to_string(),
            city: "Austin".to_string(),
            metric: 34,
            ..Default::default()
        };
        for lead_type in [LeadType::Landlord, LeadType::Employer, LeadType::University] {
            for n in 1..=5 {
                for lead in [&empty, &full] {
                    let (subject, body) = step_for(lead_type, n).render(lead);
                    assert!(!subject.is_empty());
                    assert!(!body.is_empty());
                    for text in [&subject, &body] {
                        assert!(!text.contains("{{"), "unresolved token in: {}", text);
                        assert!(!text.contains("${"), "unresolved token in: {}", text);
                    }
                }
            }
        }
    }
}

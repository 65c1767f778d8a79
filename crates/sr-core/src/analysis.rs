//! # Filings Analyst
//!
//! The room page's question box. Answers are canned and chosen by keyword;
//! nothing here reads posts, votes or market data.

use serde::Serialize;

pub const SUGGESTED_QUESTIONS: [&str; 5] = [
    "What are the benefits of the omnibus account structure?",
    "How does the IRC abolition affect foreign investors?",
    "What are the tax implications for dividend income?",
    "Explain the reporting requirements for US taxpayers",
    "What changed with the January 2024 regulations?",
];

/// Cited under every answer.
pub const SOURCES: [&str; 3] = [
    "KRX Disclosure Database",
    "Omnibus Account Guidelines",
    "NTS Tax Bulletin 2024-01",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Topic {
    OmnibusBenefits,
    OmnibusSetup,
    Tax,
    IrcReform,
    Reporting,
    Overview,
}

impl Topic {
    /// First matching rule wins. An omnibus question that is neither about
    /// benefits nor setup falls through to the later rules.
    pub fn classify(question: &str) -> Self {
        let q = question.to_lowercase();
        let any = |words: &[&str]| words.iter().any(|w| q.contains(w));

        if any(&["omnibus", "account"]) {
            if any(&["benefit", "advantage"]) {
                return Topic::OmnibusBenefits;
            }
            if any(&["setup", "open"]) {
                return Topic::OmnibusSetup;
            }
        }
        if any(&["tax", "dividend"]) {
            Topic::Tax
        } else if any(&["irc", "abolition", "january", "2024"]) {
            Topic::IrcReform
        } else if any(&["report", "fbar", "fatca"]) {
            Topic::Reporting
        } else {
            Topic::Overview
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Answer {
    pub topic: Topic,
    pub content: String,
    pub sources: Vec<String>,
}

/// Greeting shown before the first question.
pub fn welcome(room: &str) -> String {
    format!(
        "Hello! I'm your Korean filings analyst for {room}. I can help you understand \
         corporate disclosures, regulatory changes, and the new omnibus account benefits. \
         What would you like to know?"
    )
}

/// The canned answer for `question`, phrased for `room`.
pub fn answer(room: &str, question: &str) -> Answer {
    let topic = Topic::classify(question);
    Answer {
        topic,
        content: body(topic, room),
        sources: SOURCES.iter().map(|s| s.to_string()).collect(),
    }
}

fn body(topic: Topic, room: &str) -> String {
    match topic {
        Topic::OmnibusBenefits => format!(
            "The Omnibus Account structure offers several key benefits for foreign investors \
             in {room}:\n\n\
             **Instant Market Access**: Trade immediately without the previous 5-day IRC \
             registration delay.\n\n\
             **Consolidated Reporting**: All your Korean holdings are under one account \
             structure, dramatically simplifying tax reporting.\n\n\
             **Reduced Documentation**: No need to register each stock individually - your \
             broker handles KRX reporting.\n\n\
             **Lower Costs**: Eliminates the per-transaction registration fees that previously \
             applied.\n\n\
             **Tax Efficiency**: Automatic withholding at 22% (or treaty rate) with \
             consolidated year-end tax documents."
        ),
        Topic::OmnibusSetup => format!(
            "To set up an Omnibus Account for trading {room}:\n\n\
             1. **Verify Broker Support**: Check if your brokerage supports Korean omnibus \
             accounts.\n\n\
             2. **Submit Application**: Complete the omnibus account agreement with your \
             broker.\n\n\
             3. **Provide Documents**: a valid passport, proof of residence, and a W-8BEN form \
             (for US taxpayers).\n\n\
             4. **Wait for Activation**: Typically 1-2 business days (vs. 5+ days under the old \
             system).\n\n\
             5. **Fund & Trade**: Transfer funds and start trading immediately!"
        ),
        Topic::Tax => format!(
            "Tax implications for {room} investments:\n\n\
             **Dividend Withholding**: 22% automatically withheld at source for non-residents. \
             This may be reduced if your country has a tax treaty with Korea.\n\n\
             **Capital Gains**: Currently exempt for most foreign investors trading on \
             KOSPI/KOSDAQ.\n\n\
             **US Taxpayers**: report foreign accounts on FBAR (if >$10,000 aggregate), file \
             FATCA Form 8938 (if thresholds are met), and claim the foreign tax credit for \
             withheld dividends.\n\n\
             **Tax Treaties**: Many double taxation agreements with Korea reduce the dividend \
             withholding to 10-15%."
        ),
        Topic::IrcReform => format!(
            "The January 2024 IRC (Integrated Registration Code) abolition was a landmark \
             reform:\n\n\
             **What Changed**: the IRC system required a separate 5-day registration for EACH \
             stock; the omnibus system covers all Korean holdings with a single account.\n\n\
             **Impact on {room} Investors**: immediate execution instead of a 5-day delay, 90% \
             less paperwork, access through global brokers, and no per-stock registration \
             fees.\n\n\
             **Historical Context**: This was the most significant foreign investment reform in \
             30 years, aligning Korea with major markets like Japan and Hong Kong."
        ),
        Topic::Reporting => format!(
            "Reporting requirements for {room} holdings:\n\n\
             **Korean Side (Handled by Broker)**: KRX transaction reporting, dividend \
             withholding and reporting, and a year-end tax summary.\n\n\
             **Your Responsibilities**: FBAR filing if aggregate foreign accounts exceed \
             $10,000 and FATCA Form 8938 above its thresholds (US persons); reporting \
             investment income in your home country; keeping transaction records for 5 \
             years.\n\n\
             **Good News**: The omnibus structure provides consolidated reporting, making this \
             much easier than before!"
        ),
        Topic::Overview => format!(
            "Based on my analysis of {room}'s filings and the current regulatory \
             environment:\n\n\
             The Omnibus Account structure has significantly improved market access for \
             foreign investors. Key points to consider:\n\n\
             1. **Execution**: Trades settle immediately without registration delays\n\
             2. **Costs**: Lower overall fees compared to the old IRC system\n\
             3. **Compliance**: Simplified reporting while maintaining regulatory standards\n\
             4. **Access**: Available through major global brokerages\n\n\
             For specific questions about {room}'s financial disclosures, dividend history, or \
             corporate actions, please let me know what you'd like to explore further."
        ),
    }
}

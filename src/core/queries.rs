use crate::models::{NamedQuery, Query};

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Queries exercised by the smoke-test commands
pub fn catalog() -> Vec<NamedQuery> {
    vec![
        NamedQuery {
            label: "Tax Lawyer".to_string(),
            query: Query {
                id: "tax_lawyer".to_string(),
                name: "Tax Lawyer".to_string(),
                natural_language: "Seasoned attorney with a JD from a top U.S. law school and over three years of legal practice, specializing in corporate tax structuring and compliance.".to_string(),
                hard_criteria: strings(&[
                    "JD degree from an accredited U.S. law school",
                    "3+ years of experience practicing law",
                ]),
                soft_criteria: strings(&[
                    "Experience advising clients on tax implications of corporate or financial transactions",
                    "Experience handling IRS audits, disputes, or regulatory inquiries",
                    "Experience drafting legal opinions or filings related to federal and state tax compliance",
                ]),
                config_path: "tax_lawyer.yml".to_string(),
            },
        },
        NamedQuery {
            label: "Junior Corporate Lawyer".to_string(),
            query: Query {
                id: "junior_corporate_lawyer".to_string(),
                name: "Junior Corporate Lawyer".to_string(),
                natural_language: "Corporate lawyer with two years of experience at a top-tier international law firm, specializing in M&A support and cross-border contract negotiations.".to_string(),
                hard_criteria: strings(&[
                    "2-4 years of experience as a Corporate Lawyer at a leading law firm in the USA, Europe, or Canada, or in-house at a major global organization",
                    "Graduate of a reputed law school in the USA, Europe, or Canada",
                ]),
                soft_criteria: strings(&[
                    "Experience supporting Corporate M&A transactions, including due diligence and legal documentation",
                    "Experience drafting and negotiating legal contracts or commercial agreements",
                    "Familiarity with international business law or advising on regulatory requirements across jurisdictions",
                ]),
                config_path: "junior_corporate_lawyer.yml".to_string(),
            },
        },
        NamedQuery {
            label: "Radiology".to_string(),
            query: Query {
                id: "radiology".to_string(),
                name: "Radiology".to_string(),
                natural_language: "Radiologist with an MD from India and several years of experience reading CT and MRI scans.".to_string(),
                hard_criteria: strings(&["MD degree from a medical school in the U.S. or India"]),
                soft_criteria: strings(&[
                    "Board certification in Radiology (ABR, FRCR, or equivalent) or comparable credential",
                    "3+ years of experience interpreting X-ray, CT, MRI, ultrasound, or nuclear medicine studies",
                    "Expertise in radiology reporting, diagnostic protocols, differential diagnosis, or AI applications in medical imaging",
                ]),
                config_path: "radiology.yml".to_string(),
            },
        },
    ]
}

/// Look up a catalog query by its id
pub fn find(id: &str) -> Option<NamedQuery> {
    catalog().into_iter().find(|q| q.query.id == id)
}

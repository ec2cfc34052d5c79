// Test fixtures with known proposal-style texts and expected resolutions
// WHY: Golden-file testing requires deterministic input/output pairs for validation

#![allow(dead_code)]

/// Single sentence with two parenthesized abbreviations
pub const SIMPLE_TEXT: &str =
    "The Risk Management Framework (RMF) guides Assessment and Authorization (A&A) work.";

/// Rendered document for SIMPLE_TEXT
pub const SIMPLE_EXPECTED: &str = "The Risk Management Framework (RMF) guides Assessment and Authorization (A&A) work.

List of Abbreviations

| Abbreviation | Definition |
| --- | --- |
| A&A | Assessment and Authorization |
| RMF | Risk Management Framework |
";

/// Abbreviation whose capitals signature only partially matches
/// WHY: "Department of the Navy" aligns as DOTN, which scores 86 against DON
pub const NAVY_TEXT: &str = "Our team works across the Department of the Navy (DON) programs.";

/// Multi-paragraph proposal excerpt with repeated and parenthesized abbreviations
pub const PROPOSAL_TEXT: &str = "To assist Commander, US Fleet Forces Command’s (USFFC) cybersecurity initiatives that support training and equipping combat forces, executing command and control (C2) activities, performing operational planning, and executing joint missions, XYZ, Inc. (XYZ) is pleased to respond to USFFC’s solicitation for Navy Risk Management Support. As the incumbent contractor providing these services to USFFC today, XYZ is uniquely positioned to continue our support to the command in its Risk Management Framework (RMF) Assessment and Authorization (A&A) efforts because of our extensive experience across the Department of the Navy’s (DON) major Cybersecurity programs and efforts. 
XYZ, Inc. (XYZ), with headquarters located in Arlington, Virginia and offices in San Diego, California; Norfolk, Virginia; Stafford, Virginia; Reston, Virginia; Orlando, Florida; and Charleston, South Carolina, is a management and technology consulting firm specializing in systems engineering, program and project management, process management, cyber security, and Assessment and Authorization (A&A) (formerly Certification and Accreditation (C&A)). XYZ is a Veteran, Woman Owned Business, owned by Ms. Jane Doe and eligible for Small Business Concerns; VOSB - Veteran-Owned Small Business Concerns and WOSB - Women-Owned Small Business Concerns as classified in our SeaPort contract and DUN registration. XYZ currently employs over 160 employees, with annual revenue over the last 3 years averaging approximately $26 million. In support of this solicitation, XYZ has partnered with ABC Security, LLC (ABC) and DEF Consulting LLP (DEF). ABC is a Veteran Owned, Hispanic American Owned, Small Disadvantaged business specializing in Cybersecurity, Engineering and Operations, and Health Information Technology (IT). Notably, ABC has extensive Cybersecurity and RMF experience supporting major Navy commands such as MSC, NAVFAC, and NAVSEA, to include Ashore and Afloat. DEF is (something) with expertise in (stuff, waiting on DEF content), and was chosen as a teammate due to their expertise with RMF tool automation, familiarity with the SCA guidelines and practices due to their current support to the Office of the SCA, as well as their ability to quickly assist with resource surge support if/when required.
A proven foundational understanding of the USFFC’s mission. We have been successfully supporting the command since September 2012, and the USFFC Navy RMF Validator team since September 2018. Our teams work cohesively between contracts and are fully vested in USFFC’s mission and committed to continued success.
Low transition risk. As we are the incumbent providing exceptional service today, we represent minimal transition risk to USFFC at contract award. We have in-place staff ready to work on day one, continuing their exceptional support.
A wealth of Cybersecurity expertise. We have a core competency of talented individuals that meet Cybersecurity Workforce requirements and can understand and navigate the RMF process across all system types successfully (e.g., cloud, enterprise, network, site, application, system, Platform IT (PIT)). They can expertly support various types of authorizations including Ashore, Afloat, Continental United States/Outside the Continental United States (CONUS/OCONUS), and Type authorizations. 
Deeply engrained in all major Navy RMF programs efforts. Besides our USFFC work, we are also embedded in key organizations like the Office of the Navy Authorizing Official (NAO), the Office of the Security Control Assessor (SCA), Office of the Chief of Naval Operations (OPNAV), and Naval Information Warfare Systems Command (NAVWAR). We have superior internal reach back capabilities within our teams to help us understand the changing RMF landscape and solve operational challenges.
Full-service RMF operation. Not only do we perform all RMF steps and several RMF roles (e.g., Navy Qualified Validator (NQV), Information Systems Security Engineer (ISSE), Information Systems Security Officer (ISSO), NAO Analyst, PSO Analyst, Security Control Assessor- Liaison (SCA-L)), but we also provide proven and innovative training, tools, and processes that aid in expediting the RMF process.
Agility. We are agile, and have repeatedly proven that we can easily adapt to emerging/shifting mission needs.
";

/// Entries the proposal excerpt must resolve to
pub const PROPOSAL_EXPECTED: &[(&str, &str)] = &[
    ("A&A", "Assessment and Authorization"),
    ("C2", "command and control"),
    ("DON", "Department of the Navys"),
    ("ISSE", "Information Systems Security Engineer"),
    ("ISSO", "Information Systems Security Officer"),
    ("NQV", "Navy Qualified Validator"),
    ("RMF", "Risk Management Framework"),
];

/// Large text block for throughput testing
pub fn generate_large_text() -> String {
    let mut result = String::new();

    for i in 1..=200 {
        result.push_str(&format!(
            "Section {i} covers the Risk Management Framework (RMF) and Command and Control (C2) duties. "
        ));
        if i % 20 == 0 {
            result.push('\n');
        }
    }

    result
}

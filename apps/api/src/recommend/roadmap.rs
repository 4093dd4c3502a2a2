/// Hand-authored learning steps, keyed by lower-cased career title.
const ROADMAPS: &[(&str, &[&str])] = &[
    (
        "software engineer",
        &[
            "Learn Python / Java",
            "Data Structures & Algorithms",
            "Build projects (apps, APIs)",
            "Internship / Open-source",
            "Apply for software roles",
        ],
    ),
    (
        "data scientist",
        &[
            "Learn Python & SQL",
            "Statistics & Probability",
            "Machine Learning basics",
            "Projects with real datasets",
            "Apply for Data Scientist roles",
        ],
    ),
    (
        "web developer",
        &[
            "HTML, CSS, JavaScript",
            "Frontend framework (React)",
            "Backend basics",
            "Build full-stack projects",
            "Apply for Web Developer roles",
        ],
    ),
];

const GENERIC_ROADMAP: &[&str] = &[
    "Learn core skills",
    "Build projects",
    "Gain experience",
    "Apply for jobs",
];

pub const LEARNING_RESOURCES: &[&str] = &[
    "Coursera",
    "NPTEL",
    "Udemy",
    "Kaggle",
    "YouTube Tech Channels",
];

pub fn roadmap_for(title: &str) -> Vec<String> {
    let key = title.trim().to_lowercase();
    ROADMAPS
        .iter()
        .find(|(career, _)| *career == key)
        .map(|(_, steps)| *steps)
        .unwrap_or(GENERIC_ROADMAP)
        .iter()
        .map(|s| s.to_string())
        .collect()
}

pub fn learning_resources() -> Vec<String> {
    LEARNING_RESOURCES.iter().map(|s| s.to_string()).collect()
}

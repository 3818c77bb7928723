use super::model::{Experience, Presentation, Project, ProjectStatus, Skill, SkillCategory};

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

pub fn projects() -> Vec<Project> {
    vec![
        Project {
            id: "1".into(),
            title: "E-Commerce Platform".into(),
            description: "Full-stack e-commerce solution with microservices architecture".into(),
            long_description: Some(
                "A scalable e-commerce platform built with Next.js and Node.js, featuring \
                 real-time inventory management, payment processing, and analytics dashboard."
                    .into(),
            ),
            category: strings(&["web", "fullstack"]),
            technologies: strings(&["Next.js", "Node.js", "PostgreSQL", "Redis", "Docker", "Kubernetes"]),
            image_url: "/images/projects/ecommerce.jpg".into(),
            github_url: Some("https://github.com/yourusername/ecommerce".into()),
            live_url: Some("https://demo.example.com".into()),
            featured: true,
            date: "2024-01-15".into(),
            status: ProjectStatus::Completed,
        },
        Project {
            id: "2".into(),
            title: "Data Analytics Dashboard".into(),
            description: "Real-time data visualization and analytics platform".into(),
            long_description: None,
            category: strings(&["data", "visualization"]),
            technologies: strings(&["React", "D3.js", "Python", "FastAPI", "PostgreSQL"]),
            image_url: "/images/projects/analytics.jpg".into(),
            github_url: Some("https://github.com/yourusername/analytics".into()),
            live_url: None,
            featured: true,
            date: "2023-11-20".into(),
            status: ProjectStatus::Completed,
        },
    ]
}

pub fn presentations() -> Vec<Presentation> {
    vec![
        Presentation {
            id: "1".into(),
            title: "Microservices Architecture Best Practices".into(),
            description: "A comprehensive guide to building scalable microservices".into(),
            slides_path: "/presentations/microservices.html".into(),
            thumbnail: "/images/presentations/microservices-thumb.jpg".into(),
            tags: strings(&["architecture", "microservices", "docker", "kubernetes"]),
            date: "2024-02-15".into(),
            duration: Some("45 min".into()),
        },
        Presentation {
            id: "2".into(),
            title: "Modern DevOps with Kubernetes".into(),
            description: "Container orchestration and CI/CD pipelines".into(),
            slides_path: "/presentations/devops.html".into(),
            thumbnail: "/images/presentations/devops-thumb.jpg".into(),
            tags: strings(&["devops", "kubernetes", "ci/cd"]),
            date: "2024-01-10".into(),
            duration: Some("30 min".into()),
        },
    ]
}

pub fn skills() -> Vec<Skill> {
    let skill = |name: &str, level: u8, category: SkillCategory| Skill {
        name: name.to_string(),
        level,
        category,
        icon: None,
    };

    vec![
        skill("TypeScript", 90, SkillCategory::Languages),
        skill("Python", 85, SkillCategory::Languages),
        skill("Go", 75, SkillCategory::Languages),
        skill("React/Next.js", 95, SkillCategory::Frontend),
        skill("Node.js", 90, SkillCategory::Backend),
        skill("Docker", 85, SkillCategory::Devops),
        skill("Kubernetes", 80, SkillCategory::Devops),
        skill("PostgreSQL", 85, SkillCategory::Backend),
    ]
}

pub fn experience() -> Vec<Experience> {
    vec![Experience {
        id: "1".into(),
        company: "Tech Company".into(),
        position: "Senior Full Stack Developer".into(),
        duration: "2022 - Present".into(),
        location: "Remote".into(),
        description: strings(&[
            "Lead development of microservices architecture",
            "Implemented CI/CD pipelines reducing deployment time by 60%",
            "Mentored junior developers and conducted code reviews",
        ]),
        technologies: strings(&["React", "Node.js", "Kubernetes", "AWS"]),
    }]
}

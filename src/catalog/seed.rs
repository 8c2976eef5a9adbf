//! Built-in sample catalogue. These records stand in for a real content
//! backend; everything the process knows about is listed here.

use crate::model::{
    Category, Course, CourseId, Lesson, LessonId, Level, Resource, ResourceKind, Subscription,
    Timestamp, User,
};

use super::Inner;

pub(super) fn content() -> Inner {
    Inner {
        courses: courses(),
        lessons: lessons(),
        categories: categories(),
        user: user(),
    }
}

fn course_id(id: &str) -> CourseId {
    CourseId::new(id.to_string())
}

fn lesson_id(id: &str) -> LessonId {
    LessonId::new(id.to_string())
}

fn user() -> User {
    User {
        id: "1".to_string(),
        name: "João Silva".to_string(),
        email: "joao@exemplo.com".to_string(),
        avatar: "https://images.unsplash.com/photo-1472099645785-5658abf4ff4e?w=150&h=150&fit=crop&crop=face".to_string(),
        subscription: Subscription::Premium,
        joined_at: Timestamp::from_date(2024, 1, 15),
    }
}

fn categories() -> Vec<Category> {
    vec![
        Category::new("1".to_string(), "Desenvolvimento Web".to_string(), "Grid".to_string(), 12),
        Category::new("2".to_string(), "Design UI/UX".to_string(), "Star".to_string(), 8),
        Category::new("3".to_string(), "Marketing Digital".to_string(), "Circle".to_string(), 15),
        Category::new("4".to_string(), "Negócios".to_string(), "Circle".to_string(), 10),
        Category::new("5".to_string(), "Fotografia".to_string(), "Circle".to_string(), 6),
    ]
}

fn courses() -> Vec<Course> {
    vec![
        Course {
            id: course_id("1"),
            title: "React Avançado: Do Zero ao Expert".to_string(),
            description: "Aprenda React do básico ao avançado com projetos práticos e as melhores práticas do mercado.".to_string(),
            thumbnail: "https://images.unsplash.com/photo-1633356122544-f134324a6cee?w=400&h=225&fit=crop".to_string(),
            duration: 1200,
            total_lessons: 45,
            completed_lessons: 12,
            category: "Desenvolvimento Web".to_string(),
            level: Level::Advanced,
            instructor: "Maria Santos".to_string(),
            rating: 4.9,
            is_favorite: true,
            tags: strings(&["React", "JavaScript", "Frontend", "Hooks"]),
            created_at: Timestamp::from_date(2024, 1, 1),
            updated_at: Timestamp::from_date(2024, 1, 15),
        },
        Course {
            id: course_id("2"),
            title: "Design System Completo".to_string(),
            description: "Crie design systems escaláveis e consistentes para produtos digitais modernos.".to_string(),
            thumbnail: "https://images.unsplash.com/photo-1558655146-9f40138edfeb?w=400&h=225&fit=crop".to_string(),
            duration: 800,
            total_lessons: 32,
            completed_lessons: 0,
            category: "Design UI/UX".to_string(),
            level: Level::Intermediate,
            instructor: "Carlos Design".to_string(),
            rating: 4.8,
            is_favorite: false,
            tags: strings(&["Design System", "Figma", "UI", "UX"]),
            created_at: Timestamp::from_date(2024, 1, 5),
            updated_at: Timestamp::from_date(2024, 1, 20),
        },
        Course {
            id: course_id("3"),
            title: "Next.js 15: Aplicações Full-Stack".to_string(),
            description: "Desenvolva aplicações completas com Next.js 15, incluindo autenticação, banco de dados e deploy.".to_string(),
            thumbnail: "https://images.unsplash.com/photo-1627398242454-45a1465c2479?w=400&h=225&fit=crop".to_string(),
            duration: 1500,
            total_lessons: 60,
            completed_lessons: 25,
            category: "Desenvolvimento Web".to_string(),
            level: Level::Advanced,
            instructor: "Pedro Tech".to_string(),
            rating: 4.9,
            is_favorite: true,
            tags: strings(&["Next.js", "Full-Stack", "TypeScript", "Prisma"]),
            created_at: Timestamp::from_date(2024, 1, 10),
            updated_at: Timestamp::from_date(2024, 1, 25),
        },
        Course {
            id: course_id("4"),
            title: "Marketing Digital para Iniciantes".to_string(),
            description: "Estratégias completas de marketing digital para alavancar seu negócio online.".to_string(),
            thumbnail: "https://images.unsplash.com/photo-1460925895917-afdab827c52f?w=400&h=225&fit=crop".to_string(),
            duration: 600,
            total_lessons: 24,
            completed_lessons: 24,
            category: "Marketing Digital".to_string(),
            level: Level::Beginner,
            instructor: "Ana Marketing".to_string(),
            rating: 4.7,
            is_favorite: false,
            tags: strings(&["SEO", "Google Ads", "Social Media", "Analytics"]),
            created_at: Timestamp::from_date(2024, 1, 8),
            updated_at: Timestamp::from_date(2024, 1, 22),
        },
        Course {
            id: course_id("5"),
            title: "Fotografia Profissional".to_string(),
            description: "Técnicas avançadas de fotografia para criar imagens impactantes e profissionais.".to_string(),
            thumbnail: "https://images.unsplash.com/photo-1606983340126-99ab4feaa64a?w=400&h=225&fit=crop".to_string(),
            duration: 900,
            total_lessons: 36,
            completed_lessons: 8,
            category: "Fotografia".to_string(),
            level: Level::Intermediate,
            instructor: "Roberto Foto".to_string(),
            rating: 4.8,
            is_favorite: true,
            tags: strings(&["Fotografia", "Lightroom", "Composição", "Iluminação"]),
            created_at: Timestamp::from_date(2024, 1, 12),
            updated_at: Timestamp::from_date(2024, 1, 28),
        },
    ]
}

fn lessons() -> Vec<Lesson> {
    vec![
        Lesson {
            id: lesson_id("1"),
            course_id: course_id("1"),
            title: "Introdução ao React 19".to_string(),
            description: "Visão geral das novidades do React 19 e configuração do ambiente.".to_string(),
            video_url: "https://commondatastorage.googleapis.com/gtv-videos-bucket/sample/BigBuckBunny.mp4".to_string(),
            duration: 1200,
            order: 1,
            is_completed: true,
            watched_time: 1200,
            resources: vec![Resource {
                id: "1".to_string(),
                title: "Slides da Aula".to_string(),
                kind: ResourceKind::Pdf,
                url: "/resources/react-intro.pdf".to_string(),
                size: Some("2.5 MB".to_string()),
            }],
            transcript: None,
        },
        Lesson {
            id: lesson_id("2"),
            course_id: course_id("1"),
            title: "Hooks Avançados".to_string(),
            description: "useCallback, useMemo, useRef e hooks customizados.".to_string(),
            video_url: "https://commondatastorage.googleapis.com/gtv-videos-bucket/sample/ElephantsDream.mp4".to_string(),
            duration: 1800,
            order: 2,
            is_completed: true,
            // raw upstream record: completed with only half the video watched
            watched_time: 900,
            resources: vec![Resource {
                id: "2".to_string(),
                title: "Código da Aula".to_string(),
                kind: ResourceKind::Link,
                url: "https://github.com/exemplo/hooks-avancados".to_string(),
                size: None,
            }],
            transcript: None,
        },
        Lesson {
            id: lesson_id("3"),
            course_id: course_id("1"),
            title: "Context API e Zustand".to_string(),
            description: "Gerenciamento de estado global com Context API e Zustand.".to_string(),
            video_url: "https://commondatastorage.googleapis.com/gtv-videos-bucket/sample/ForBiggerBlazes.mp4".to_string(),
            duration: 2100,
            order: 3,
            is_completed: false,
            watched_time: 0,
            resources: Vec::new(),
            transcript: None,
        },
    ]
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

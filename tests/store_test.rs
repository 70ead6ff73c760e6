use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use study_portal::models::*;
use study_portal::store::{MemStorage, Storage};

fn new_file(title: &str, subject: Subject, semester: Semester) -> NewFile {
    NewFile {
        title: title.to_string(),
        subject,
        grade: Grade::Twelve,
        semester,
        file_path: format!("/api/files/download/{}.pdf", title),
        file_name: format!("{}.pdf", title),
        file_size: 1024,
        file_type: "application/pdf".to_string(),
    }
}

fn new_quiz(title: &str) -> NewQuiz {
    NewQuiz {
        title: title.to_string(),
        subject: "math".to_string(),
        creator_name: "Mona".to_string(),
        is_public: true,
    }
}

fn new_question(quiz_id: Id, order: i32) -> NewQuizQuestion {
    NewQuizQuestion {
        quiz_id,
        question_text: format!("Question {}", order),
        question_type: QuestionType::TrueFalse,
        options: Vec::new(),
        correct_answer: "true".to_string(),
        order,
    }
}

fn new_attempt(quiz_id: Id, taker: &str) -> NewQuizAttempt {
    NewQuizAttempt {
        quiz_id,
        taker_name: taker.to_string(),
        score: 0,
        total_questions: 0,
        answers: Vec::new(),
    }
}

fn new_day(week_id: Id, day: Weekday) -> NewExamDay {
    NewExamDay {
        week_id,
        day,
        date: "2025-01-05".to_string(),
        subject: "physics".to_string(),
        lessons: "Chapters 1-3".to_string(),
    }
}

#[tokio::test]
async fn create_then_get_returns_the_stored_value() {
    let store = MemStorage::new();

    let file = store
        .create_file(new_file("algebra", Subject::Math, Semester::First))
        .await;
    assert_eq!(file.id, 1);
    assert_eq!(file.title, "algebra");
    assert_eq!(store.get_file(file.id).await, Some(file));

    let week = store
        .create_exam_week(NewExamWeek { name: "Week 1".to_string() })
        .await;
    assert_eq!(week.id, 1);
    assert_eq!(store.get_exam_week(week.id).await, Some(week));

    let quiz = store.create_quiz(new_quiz("Limits")).await;
    assert_eq!(quiz.id, 1);
    assert_eq!(quiz.quiz_code.len(), 6);
    assert!(quiz.is_public);
    assert_eq!(store.get_quiz(quiz.id).await, Some(quiz));
}

#[tokio::test]
async fn ids_are_per_kind_and_never_reused() {
    let store = MemStorage::new();

    let first = store.create_file(new_file("a", Subject::Math, Semester::First)).await;
    let second = store.create_file(new_file("b", Subject::Math, Semester::First)).await;
    let week = store
        .create_exam_week(NewExamWeek { name: "Week".to_string() })
        .await;
    assert_eq!((first.id, second.id, week.id), (1, 2, 1));

    assert!(store.delete_file(second.id).await);
    let third = store.create_file(new_file("c", Subject::Math, Semester::First)).await;
    assert_eq!(third.id, 3);
}

#[tokio::test]
async fn empty_update_is_a_no_op() {
    let store = MemStorage::new();
    let file = store
        .create_file(new_file("notes", Subject::Biology, Semester::Second))
        .await;

    let updated = store.update_file(file.id, UpdateFile::default()).await;
    assert_eq!(updated, Some(file.clone()));
    assert_eq!(store.get_file(file.id).await, Some(file));
}

#[tokio::test]
async fn update_merges_only_provided_fields() {
    let store = MemStorage::new();
    let file = store
        .create_file(new_file("notes", Subject::Biology, Semester::Second))
        .await;

    let updated = store
        .update_file(
            file.id,
            UpdateFile {
                title: Some("cell notes".to_string()),
                ..Default::default()
            },
        )
        .await
        .expect("file exists");

    assert_eq!(updated.id, file.id);
    assert_eq!(updated.title, "cell notes");
    assert_eq!(updated.subject, Subject::Biology);
    assert_eq!(updated.upload_date, file.upload_date);
    assert_eq!(updated.file_name, file.file_name);
}

#[tokio::test]
async fn unknown_ids_signal_absence() {
    let store = MemStorage::new();

    assert_eq!(store.get_file(42).await, None);
    assert_eq!(store.update_quiz(42, UpdateQuiz::default()).await, None);
    assert!(!store.delete_file(42).await);
    assert!(!store.delete_exam_week(42).await);
    assert!(!store.delete_quiz(42).await);
    assert!(!store.delete_exam_day(42).await);
    assert!(!store.delete_quiz_question(42).await);
}

#[tokio::test]
async fn delete_removes_and_later_get_is_absent() {
    let store = MemStorage::new();
    let file = store.create_file(new_file("x", Subject::Arabic, Semester::First)).await;

    assert!(store.delete_file(file.id).await);
    assert_eq!(store.get_file(file.id).await, None);
    assert!(!store.delete_file(file.id).await);
}

#[tokio::test]
async fn deleting_missing_child_has_no_side_effect() {
    let store = MemStorage::new();
    let week = store
        .create_exam_week(NewExamWeek { name: "Week".to_string() })
        .await;
    store.create_exam_day(new_day(week.id, Weekday::Monday)).await;
    let quiz = store.create_quiz(new_quiz("Q")).await;
    store.create_quiz_question(new_question(quiz.id, 1)).await;

    assert!(!store.delete_exam_day(99).await);
    assert!(!store.delete_quiz_question(99).await);

    assert_eq!(store.list_exam_days_by_week(week.id).await.len(), 1);
    assert_eq!(store.list_questions_by_quiz(quiz.id).await.len(), 1);
}

#[tokio::test]
async fn deleting_a_week_cascades_to_its_days_only() {
    let store = MemStorage::new();
    let week = store
        .create_exam_week(NewExamWeek { name: "Finals".to_string() })
        .await;
    let other = store
        .create_exam_week(NewExamWeek { name: "Midterms".to_string() })
        .await;
    for day in [Weekday::Sunday, Weekday::Tuesday, Weekday::Thursday] {
        store.create_exam_day(new_day(week.id, day)).await;
    }
    let kept = store
        .create_exam_day(new_day(other.id, Weekday::Monday))
        .await
        .expect("week exists");

    assert!(store.delete_exam_week(week.id).await);

    assert_eq!(store.get_exam_week(week.id).await, None);
    assert!(store.list_exam_days_by_week(week.id).await.is_empty());
    assert_eq!(store.list_exam_days_by_week(other.id).await, vec![kept]);
}

#[tokio::test]
async fn deleting_a_quiz_cascades_to_questions_and_attempts() {
    let store = MemStorage::new();
    let quiz = store.create_quiz(new_quiz("Doomed")).await;
    let other = store.create_quiz(new_quiz("Kept")).await;

    let mut question_ids = Vec::new();
    for order in 1..=3 {
        let question = store
            .create_quiz_question(new_question(quiz.id, order))
            .await
            .expect("quiz exists");
        question_ids.push(question.id);
    }
    let attempt = store
        .create_quiz_attempt(new_attempt(quiz.id, "Ali"))
        .await
        .expect("quiz exists");
    store.create_quiz_question(new_question(other.id, 1)).await;
    store.create_quiz_attempt(new_attempt(other.id, "Sara")).await;

    assert!(store.delete_quiz(quiz.id).await);

    assert!(store.list_questions_by_quiz(quiz.id).await.is_empty());
    assert!(store.list_attempts_by_quiz(quiz.id).await.is_empty());
    for id in question_ids {
        assert_eq!(store.get_quiz_question(id).await, None);
    }
    assert_eq!(store.get_quiz_attempt(attempt.id).await, None);

    assert_eq!(store.list_questions_by_quiz(other.id).await.len(), 1);
    assert_eq!(store.list_attempts_by_quiz(other.id).await.len(), 1);
}

#[tokio::test]
async fn file_filters_are_conjunctive_with_all_sentinel() {
    let store = MemStorage::new();
    let math_first = store
        .create_file(new_file("m1", Subject::Math, Semester::First))
        .await;
    store
        .create_file(new_file("m2", Subject::Math, Semester::Second))
        .await;
    store
        .create_file(new_file("p1", Subject::Physics, Semester::First))
        .await;

    let everything = store.list_files_by_filters(&FileFilter::default()).await;
    assert_eq!(everything.len(), 3);
    assert_eq!(everything, store.list_files().await);

    let exact = FileFilter {
        grade: Filter::Only(Grade::Twelve),
        subject: Filter::Only(Subject::Math),
        semester: Filter::Only(Semester::First),
    };
    assert_eq!(store.list_files_by_filters(&exact).await, vec![math_first]);

    let first_semester = FileFilter {
        semester: Filter::Only(Semester::First),
        ..Default::default()
    };
    let titles: Vec<String> = store
        .list_files_by_filters(&first_semester)
        .await
        .into_iter()
        .map(|f| f.title)
        .collect();
    assert_eq!(titles, vec!["m1", "p1"]);

    let none = FileFilter {
        subject: Filter::Only(Subject::Islamic),
        ..Default::default()
    };
    assert!(store.list_files_by_filters(&none).await.is_empty());
}

#[tokio::test]
async fn questions_are_listed_by_ascending_order() {
    let store = MemStorage::new();
    let quiz = store.create_quiz(new_quiz("Order")).await;
    for order in [3, 1, 5, 2, 4] {
        store.create_quiz_question(new_question(quiz.id, order)).await;
    }

    let orders: Vec<i32> = store
        .list_questions_by_quiz(quiz.id)
        .await
        .iter()
        .map(|q| q.order)
        .collect();
    assert_eq!(orders, vec![1, 2, 3, 4, 5]);
}

#[tokio::test]
async fn exam_days_are_listed_in_weekday_order() {
    let store = MemStorage::new();
    let week = store
        .create_exam_week(NewExamWeek { name: "Week".to_string() })
        .await;
    for day in [Weekday::Thursday, Weekday::Sunday, Weekday::Tuesday] {
        store.create_exam_day(new_day(week.id, day)).await;
    }

    let days: Vec<Weekday> = store
        .list_exam_days_by_week(week.id)
        .await
        .iter()
        .map(|d| d.day)
        .collect();
    assert_eq!(days, vec![Weekday::Sunday, Weekday::Tuesday, Weekday::Thursday]);
}

#[tokio::test]
async fn attempts_are_listed_most_recent_first() {
    let store = MemStorage::new();
    let quiz = store.create_quiz(new_quiz("Recent")).await;
    for taker in ["first", "second", "third"] {
        store.create_quiz_attempt(new_attempt(quiz.id, taker)).await;
        tokio::time::sleep(std::time::Duration::from_millis(2)).await;
    }

    let takers: Vec<String> = store
        .list_attempts_by_quiz(quiz.id)
        .await
        .into_iter()
        .map(|a| a.taker_name)
        .collect();
    assert_eq!(takers, vec!["third", "second", "first"]);
}

#[tokio::test]
async fn quiz_code_lookup_is_case_insensitive() {
    let store = MemStorage::with_code_generator(|| "ABC234".to_string());
    let quiz = store.create_quiz(new_quiz("Code")).await;

    assert_eq!(store.get_quiz_by_code("abc234").await, Some(quiz.clone()));
    assert_eq!(store.get_quiz_by_code("ABC234").await, Some(quiz));
    assert_eq!(store.get_quiz_by_code("ZZZZZZ").await, None);
}

#[tokio::test]
async fn colliding_quiz_codes_are_redrawn() {
    let draws = Arc::new(AtomicUsize::new(0));
    let counter = draws.clone();
    let store = MemStorage::with_code_generator(move || {
        let n = counter.fetch_add(1, Ordering::SeqCst);
        if n < 3 { "AAAAAA".to_string() } else { "BBBBBB".to_string() }
    });

    let first = store.create_quiz(new_quiz("one")).await;
    let second = store.create_quiz(new_quiz("two")).await;

    assert_eq!(first.quiz_code, "AAAAAA");
    assert_eq!(second.quiz_code, "BBBBBB");
    assert_eq!(draws.load(Ordering::SeqCst), 4);
}

#[tokio::test]
async fn usernames_are_unique() {
    let store = MemStorage::new();
    let user = store
        .create_user(NewUser {
            username: "admin".to_string(),
            password_hash: "hash".to_string(),
        })
        .await
        .expect("first admin");

    let duplicate = store
        .create_user(NewUser {
            username: "admin".to_string(),
            password_hash: "other".to_string(),
        })
        .await;
    assert!(duplicate.is_none());
    assert_eq!(store.get_user_by_username("admin").await, Some(user.clone()));
    assert_eq!(store.get_user(user.id).await, Some(user.clone()));

    assert!(store.delete_user(user.id).await);
    assert_eq!(store.get_user_by_username("admin").await, None);
}

#[tokio::test]
async fn separate_instances_share_nothing() {
    let a = MemStorage::new();
    let b = MemStorage::new();
    a.create_file(new_file("only-a", Subject::English, Semester::First)).await;

    assert_eq!(a.list_files().await.len(), 1);
    assert!(b.list_files().await.is_empty());
}

#[tokio::test]
async fn child_updates_merge_and_reorder() {
    let store = MemStorage::new();
    let quiz = store.create_quiz(new_quiz("Reorder")).await;
    let first = store
        .create_quiz_question(new_question(quiz.id, 1))
        .await
        .expect("quiz exists");
    let second = store
        .create_quiz_question(new_question(quiz.id, 2))
        .await
        .expect("quiz exists");

    let moved = store
        .update_quiz_question(
            first.id,
            UpdateQuizQuestion {
                order: Some(3),
                ..Default::default()
            },
        )
        .await
        .expect("question exists");
    assert_eq!(moved.question_text, first.question_text);
    let ids: Vec<Id> = store
        .list_questions_by_quiz(quiz.id)
        .await
        .iter()
        .map(|q| q.id)
        .collect();
    assert_eq!(ids, vec![second.id, first.id]);

    let renamed = store
        .update_quiz(
            quiz.id,
            UpdateQuiz {
                is_public: Some(false),
                ..Default::default()
            },
        )
        .await
        .expect("quiz exists");
    assert!(!renamed.is_public);
    assert_eq!(renamed.quiz_code, quiz.quiz_code);

    let week = store
        .create_exam_week(NewExamWeek { name: "Week".to_string() })
        .await;
    let day = store
        .create_exam_day(new_day(week.id, Weekday::Monday))
        .await
        .expect("week exists");
    let updated = store
        .update_exam_day(
            day.id,
            UpdateExamDay {
                lessons: Some("Chapter 4".to_string()),
                ..Default::default()
            },
        )
        .await
        .expect("day exists");
    assert_eq!(updated.lessons, "Chapter 4");
    assert_eq!(updated.date, day.date);
    assert_eq!(store.get_exam_day(day.id).await, Some(updated));

    let attempt = store
        .create_quiz_attempt(new_attempt(quiz.id, "Ali"))
        .await
        .expect("quiz exists");
    assert!(store.delete_quiz_attempt(attempt.id).await);
    assert!(!store.delete_quiz_attempt(attempt.id).await);
}

#[tokio::test]
async fn children_are_refused_once_the_parent_is_gone() {
    let store = MemStorage::new();
    let quiz = store.create_quiz(new_quiz("Gone")).await;
    let week = store
        .create_exam_week(NewExamWeek { name: "Gone".to_string() })
        .await;
    assert!(store.delete_quiz(quiz.id).await);
    assert!(store.delete_exam_week(week.id).await);

    assert_eq!(store.create_quiz_question(new_question(quiz.id, 1)).await, None);
    assert_eq!(store.create_quiz_attempt(new_attempt(quiz.id, "Ali")).await, None);
    assert_eq!(store.create_exam_day(new_day(week.id, Weekday::Sunday)).await, None);

    assert!(store.list_questions_by_quiz(quiz.id).await.is_empty());
    assert!(store.list_attempts_by_quiz(quiz.id).await.is_empty());
    assert!(store.list_exam_days_by_week(week.id).await.is_empty());

    // Refused inserts do not consume ids.
    let live = store.create_quiz(new_quiz("Live")).await;
    let question = store
        .create_quiz_question(new_question(live.id, 1))
        .await
        .expect("quiz exists");
    assert_eq!(question.id, 1);
}

#[tokio::test]
async fn children_cannot_be_moved_to_a_missing_parent() {
    let store = MemStorage::new();
    let quiz = store.create_quiz(new_quiz("Home")).await;
    let question = store
        .create_quiz_question(new_question(quiz.id, 1))
        .await
        .expect("quiz exists");
    let week = store
        .create_exam_week(NewExamWeek { name: "Home".to_string() })
        .await;
    let day = store
        .create_exam_day(new_day(week.id, Weekday::Monday))
        .await
        .expect("week exists");

    let moved = store
        .update_quiz_question(
            question.id,
            UpdateQuizQuestion {
                quiz_id: Some(99),
                ..Default::default()
            },
        )
        .await;
    assert_eq!(moved, None);
    let moved = store
        .update_exam_day(
            day.id,
            UpdateExamDay {
                week_id: Some(99),
                ..Default::default()
            },
        )
        .await;
    assert_eq!(moved, None);

    assert_eq!(store.get_quiz_question(question.id).await, Some(question));
    assert_eq!(store.get_exam_day(day.id).await, Some(day));
}

#[tokio::test]
async fn week_and_days_are_created_together() {
    let store = MemStorage::new();
    let slot = |day: Weekday| ExamDaySlot {
        day,
        date: "2025-01-05".to_string(),
        subject: "chemistry".to_string(),
        lessons: String::new(),
    };

    let (week, days) = store
        .create_exam_week_with_days(
            NewExamWeek { name: "Finals".to_string() },
            vec![slot(Weekday::Wednesday), slot(Weekday::Sunday)],
        )
        .await;

    assert_eq!(store.get_exam_week(week.id).await, Some(week.clone()));
    assert!(days.iter().all(|d| d.week_id == week.id));
    assert_eq!(
        days.iter().map(|d| d.day).collect::<Vec<_>>(),
        vec![Weekday::Sunday, Weekday::Wednesday]
    );
    assert_eq!(store.list_exam_days_by_week(week.id).await, days);

    let (empty, none) = store
        .create_exam_week_with_days(NewExamWeek { name: "Empty".to_string() }, Vec::new())
        .await;
    assert_eq!(empty.id, week.id + 1);
    assert!(none.is_empty());
}

//! Domain rules exercised through the public API, following one course
//! from request to rating.

use std::collections::HashMap;

use chrono::Utc;
use tokio_test::{assert_err, assert_ok};
use uuid::Uuid;

use learning_portal::domain::{
    average_rating, ensure_no_existing_course, Assessment, AssessmentDraft, Assignment,
    AssignmentProgress, Attempt, AttemptResult, Course, CourseContent, CourseRating,
    CourseRequest, Decision, PublicAssessment, QuestionDraft, RequestStatus, SelectedOption,
};
use learning_portal::errors::AppError;

fn pending_request(manager_id: Uuid) -> CourseRequest {
    CourseRequest {
        id: Uuid::new_v4(),
        title: "Secure coding".to_string(),
        description: "OWASP basics".to_string(),
        concept: "Threat modelling".to_string(),
        duration: "2 weeks".to_string(),
        status: RequestStatus::Pending,
        manager_id,
        created_at: Utc::now(),
    }
}

fn content(request: &CourseRequest) -> CourseContent {
    CourseContent {
        title: request.title.clone(),
        description: request.description.clone(),
        concept: request.concept.clone(),
        duration: request.duration.clone(),
        video_link: Some("https://videos.example.com/secure-coding".to_string()),
        pdf_link: None,
    }
}

fn four_question_draft() -> AssessmentDraft {
    AssessmentDraft {
        total_marks: 100.0,
        passing_marks: 50.0,
        number_of_questions: 4,
        questions: (0..4)
            .map(|i| QuestionDraft {
                question_text: format!("Question {}", i + 1),
                options: vec!["a".to_string(), "b".to_string(), "c".to_string()],
                correct_answer: i % 3,
            })
            .collect(),
    }
}

/// Answer the first `correct` questions right and the rest wrong.
fn answers(assessment: &Assessment, correct: usize) -> HashMap<Uuid, SelectedOption> {
    assessment
        .questions
        .iter()
        .enumerate()
        .map(|(i, q)| {
            let choice = if i < correct {
                q.correct_answer
            } else {
                (q.correct_answer + 1) % q.options.len()
            };
            (q.id, SelectedOption::Index(choice as i64))
        })
        .collect()
}

#[test]
fn test_course_lifecycle_from_request_to_rating() {
    let manager_id = Uuid::new_v4();
    let admin_id = Uuid::new_v4();
    let employee_id = Uuid::new_v4();

    // Approval
    let mut request = pending_request(manager_id);
    assert_err!(request.ensure_approved());
    request.status = assert_ok!(request.decide(Decision::Approve));
    assert_ok!(request.ensure_approved());

    // Course creation, guarded against duplicates
    assert_ok!(ensure_no_existing_course(None));
    let course = Course::from_content(content(&request), admin_id, request.id);
    assert_eq!(course.request_id, request.id);
    let conflict = ensure_no_existing_course(Some(&course)).unwrap_err();
    assert!(matches!(conflict, AppError::Conflict(_)));

    // Assessment
    let draft = four_question_draft();
    assert_ok!(draft.validate());
    let assessment = Assessment::from_draft(course.id, draft);
    let public = PublicAssessment::from(&assessment);
    assert_eq!(public.questions.len(), 4);

    // Assignment and progress
    let mut assignment = Assignment::new(course.id, employee_id, manager_id);
    assert_ok!(assignment.record_progress(60));
    assert!(!assignment.is_completed);
    assert_ok!(assignment.record_progress(100));
    assert!(assignment.is_completed);

    // Attempt: 2 of 4 correct on 100 marks reaches the 50 pass mark
    let grade = assessment.grade(&answers(&assessment, 2));
    let attempt = Attempt::record(&assessment, employee_id, grade);
    let result = AttemptResult::from(&attempt);
    assert_eq!(result.score, 50.0);
    assert!(result.is_passed);

    // Rating, then a revision
    let mut rating = CourseRating::new(course.id, employee_id, 3, Some("Useful".to_string()));
    rating.revise(5, None);
    assert_eq!(rating.rating, 5);
    assert_eq!(rating.review, "Useful");

    let progress = AssignmentProgress::build(
        &assignment,
        None,
        Some(course),
        Some(&attempt),
        Some(&rating),
    );
    assert_eq!(progress.progress, 100);
    assert_eq!(progress.assessment.unwrap().score, 50.0);
    assert_eq!(progress.rating.unwrap().rating, 5);
}

#[test]
fn test_rejected_request_cannot_become_a_course() {
    let mut request = pending_request(Uuid::new_v4());
    request.status = assert_ok!(request.decide(Decision::Reject));

    assert_err!(request.ensure_approved());
    assert_ok!(request.ensure_deletable());
    assert_err!(request.decide(Decision::Approve));
}

#[test]
fn test_one_correct_answer_fails_half_pass_mark() {
    let assessment = Assessment::from_draft(Uuid::new_v4(), four_question_draft());
    let grade = assessment.grade(&answers(&assessment, 1));

    assert_eq!(grade.correct, 1);
    assert_eq!(grade.score, 25.0);
    assert!(!grade.is_passed);
}

#[test]
fn test_all_correct_scores_total_marks() {
    let assessment = Assessment::from_draft(Uuid::new_v4(), four_question_draft());
    let grade = assessment.grade(&answers(&assessment, 4));

    assert_eq!(grade.score, 100.0);
    assert!(grade.is_passed);
}

#[test]
fn test_average_over_several_ratings() {
    let course_id = Uuid::new_v4();
    let ratings: Vec<CourseRating> = [5, 4, 3]
        .into_iter()
        .map(|stars| CourseRating::new(course_id, Uuid::new_v4(), stars, None))
        .collect();

    assert_eq!(average_rating(&ratings), 4.0);
    assert_eq!(average_rating(&Vec::<CourseRating>::new()), 0.0);
}

use serde::{Deserialize, Serialize};

use super::Id;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExamWeek {
    pub id: Id,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewExamWeek {
    pub name: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateExamWeek {
    pub name: Option<String>,
}

impl ExamWeek {
    pub fn apply(&mut self, update: UpdateExamWeek) {
        if let Some(name) = update.name {
            self.name = name;
        }
    }
}

/// School days on which exams are held, in calendar order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Weekday {
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExamDay {
    pub id: Id,
    pub week_id: Id,
    pub day: Weekday,
    /// Free-form, displayed as entered.
    pub date: String,
    pub subject: String,
    pub lessons: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewExamDay {
    pub week_id: Id,
    pub day: Weekday,
    pub date: String,
    pub subject: String,
    pub lessons: String,
}

/// A day that is not yet filed under a week, used when the week and its
/// days are created together.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExamDaySlot {
    pub day: Weekday,
    pub date: String,
    pub subject: String,
    pub lessons: String,
}

impl ExamDaySlot {
    pub fn into_new(self, week_id: Id) -> NewExamDay {
        NewExamDay {
            week_id,
            day: self.day,
            date: self.date,
            subject: self.subject,
            lessons: self.lessons,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateExamDay {
    pub week_id: Option<Id>,
    pub day: Option<Weekday>,
    pub date: Option<String>,
    pub subject: Option<String>,
    pub lessons: Option<String>,
}

impl ExamDay {
    pub fn apply(&mut self, update: UpdateExamDay) {
        if let Some(week_id) = update.week_id {
            self.week_id = week_id;
        }
        if let Some(day) = update.day {
            self.day = day;
        }
        if let Some(date) = update.date {
            self.date = date;
        }
        if let Some(subject) = update.subject {
            self.subject = subject;
        }
        if let Some(lessons) = update.lessons {
            self.lessons = lessons;
        }
    }
}

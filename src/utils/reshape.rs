use chrono::Local;

use crate::models::{Lesson, RawLesson, RawScheduleResponse, ReshapedSchedule};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

// Reshapes the API response, stamping it with the current local time.
pub fn reshape(raw: RawScheduleResponse) -> ReshapedSchedule {
    let timestamp = Local::now().format(TIMESTAMP_FORMAT).to_string();
    reshape_at(raw, timestamp)
}

// Groups the simplified lessons under their date, keeping the API's order within each day.
pub fn reshape_at(raw: RawScheduleResponse, last_executed: String) -> ReshapedSchedule {
    let lessons_list = raw
        .lezioni_calendario
        .into_iter()
        .map(|(date, lessons)| (date, lessons.into_iter().map(simplify).collect()))
        .collect();

    ReshapedSchedule {
        main_course_data: raw.corso_di_laurea,
        last_executed,
        lessons_list,
    }
}

fn simplify(lesson: RawLesson) -> Lesson {
    Lesson {
        name: lesson.descrizione_insegnamento,
        aula: lesson.descrizione_aula,
        start: lesson.ora_inizio,
        end: lesson.ora_fine,
        note: lesson.note,
    }
}

use nom::{
    bytes::complete::{take_till, take_till1},
    character::complete::char,
    combinator::{opt, rest},
    sequence::{preceded, terminated, tuple},
    IResult,
};

use crate::course::CourseRecord;

/// `id,title[,prerequisites]`, where the prerequisites run to the end of the line.
fn course_line(input: &str) -> IResult<&str, (&str, &str, Option<&str>)> {
    tuple((
        terminated(take_till1(|c: char| c == ','), char(',')),
        take_till(|c: char| c == ','),
        opt(preceded(char(','), rest)),
    ))(input)
}

/// Parses a single line with its terminator already removed.
pub fn parse_course(line: &str) -> Option<CourseRecord> {
    match course_line(line) {
        Ok((_, (id, title, prerequisites))) => Some(CourseRecord::new(
            id,
            title,
            prerequisites.unwrap_or_default(),
        )),
        Err(_) => None,
    }
}

//! Interactive questions with validation loops.

use std::io::{BufRead, Write};

use tracing::debug;

use crate::config::{Catalog, DayFilter, FilterSpec, MonthFilter};
use crate::error::{BikeshareError, Result};

const RETRY: &str = "\nSorry! That's not a valid option. Please try again.\n";

/// Asks questions on `output` and reads answers from `input`.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Prompter { input, output }
    }

    /// Where questions and reports are written.
    pub fn output(&mut self) -> &mut W {
        &mut self.output
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Prints `question` and returns the next input line without its newline.
    fn ask(&mut self, question: &str) -> Result<String> {
        write!(self.output, "{question}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(BikeshareError::InputClosed);
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }

    /// Repeats `question` until `parse` accepts the answer.
    fn ask_until<T>(
        &mut self,
        question: &str,
        retry: &str,
        mut parse: impl FnMut(&str) -> Option<T>,
    ) -> Result<T> {
        let mut answer = self.ask(question)?;
        loop {
            if let Some(value) = parse(&answer) {
                return Ok(value);
            }
            debug!(answer = %answer, "Rejected answer");
            answer = self.ask(retry)?;
        }
    }

    /// Asks for city, month and day in turn.
    pub fn ask_filter(&mut self, catalog: &Catalog) -> Result<FilterSpec> {
        writeln!(self.output, "\nHello! Let's explore some US bikeshare data!\n")?;

        let choices = catalog
            .cities()
            .map(crate::config::title_case)
            .collect::<Vec<_>>()
            .join(", ");
        let city_question = format!(
            "Which city would you like to see data for?\n\
             Please select one of the following: {choices}\n"
        );
        let city_retry = format!("{RETRY}{city_question}");
        let city = self.ask_until(&city_question, &city_retry, |a| catalog.parse_city(a).ok())?;

        let month_question = format!(
            "\nWhich month would you like to see data for? ({})\n",
            catalog.months().join(", ")
        );
        let month_retry = format!("{RETRY}{month_question}");
        let month: MonthFilter =
            self.ask_until(&month_question, &month_retry, |a| catalog.parse_month(a).ok())?;

        let day_question = format!(
            "\nWhich day would you like to see data for? ({})\n",
            catalog.days().join(", ")
        );
        let day_retry = format!("{RETRY}{day_question}");
        let day: DayFilter =
            self.ask_until(&day_question, &day_retry, |a| catalog.parse_day(a).ok())?;

        writeln!(self.output, "{}", crate::output::separator())?;
        Ok(FilterSpec { city, month, day })
    }

    /// Y/N question about showing (more) raw rows.
    pub fn ask_raw_rows(&mut self, first: bool) -> Result<bool> {
        let question = if first {
            "Would you like to view the raw data?\n Please enter \"Y\" or \"N\": "
        } else {
            "Would you like to view more raw data?\n Please select \"Y\" or \"N\": "
        };
        self.ask_until(
            question,
            "Sorry! That's not a valid option.\nPlease only select \"Y\" or \"N\": \n",
            |a| match a.trim().to_uppercase().as_str() {
                "Y" => Some(true),
                "N" => Some(false),
                _ => None,
            },
        )
    }

    /// True only when the answer is "yes".
    pub fn ask_restart(&mut self) -> Result<bool> {
        let answer = self.ask("\nWould you like to restart? Enter yes or no.\n")?;
        Ok(answer.trim().eq_ignore_ascii_case("yes"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;
    use std::io::Cursor;

    fn prompter(input: &str) -> Prompter<Cursor<Vec<u8>>, Vec<u8>> {
        Prompter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    fn output(p: Prompter<Cursor<Vec<u8>>, Vec<u8>>) -> String {
        String::from_utf8(p.into_output()).unwrap()
    }

    #[test]
    fn test_ask_filter_accepts_valid_answers() {
        let mut p = prompter("Chicago\nMarch\nFRIDAY\n");
        let filter = p.ask_filter(&Catalog::default()).unwrap();

        assert_eq!(filter.city, "chicago");
        assert_eq!(filter.month, MonthFilter::Month(3));
        assert_eq!(filter.day, DayFilter::Day(Weekday::Fri));
        assert!(!output(p).contains("Sorry!"));
    }

    #[test]
    fn test_ask_filter_retries_invalid_answers() {
        let mut p = prompter("boston\nnew york city\njuly\nall\nfunday\nall\n");
        let filter = p.ask_filter(&Catalog::default()).unwrap();

        assert_eq!(filter.city, "new york city");
        assert_eq!(filter.month, MonthFilter::All);
        assert_eq!(filter.day, DayFilter::All);
        assert_eq!(output(p).matches("Sorry! That's not a valid option").count(), 3);
    }

    #[test]
    fn test_ask_filter_input_closed() {
        let mut p = prompter("chicago\n");
        assert!(matches!(
            p.ask_filter(&Catalog::default()),
            Err(BikeshareError::InputClosed)
        ));
    }

    #[test]
    fn test_ask_raw_rows() {
        let mut p = prompter("maybe\ny\nN\n");
        assert!(p.ask_raw_rows(true).unwrap());
        assert!(!p.ask_raw_rows(false).unwrap());
        assert!(output(p).contains("Please only select"));
    }

    #[test]
    fn test_ask_restart() {
        let mut p = prompter("YES\nno\nsure\n");
        assert!(p.ask_restart().unwrap());
        assert!(!p.ask_restart().unwrap());
        assert!(!p.ask_restart().unwrap());
    }
}

use super::types::TestRecord;
use crate::error::Result;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::io::Cursor;

/// Generate JUnit XML from the records of a run
pub fn generate_junit_xml(records: &[TestRecord], timestamp: &str) -> Result<String> {
    let mut writer = Writer::new(Cursor::new(Vec::new()));

    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    let total_tests = records.len().to_string();
    let failures = records.iter().filter(|r| r.is_failed()).count().to_string();

    let mut suites_start = BytesStart::new("testsuites");
    suites_start.push_attribute(("name", "end-end-tests"));
    suites_start.push_attribute(("tests", total_tests.as_str()));
    suites_start.push_attribute(("failures", failures.as_str()));
    writer.write_event(Event::Start(suites_start))?;

    // Records carry no grouping, so the whole run is one suite
    let mut suite_start = BytesStart::new("testsuite");
    suite_start.push_attribute(("name", "default"));
    suite_start.push_attribute(("tests", total_tests.as_str()));
    suite_start.push_attribute(("failures", failures.as_str()));
    suite_start.push_attribute(("timestamp", timestamp));
    writer.write_event(Event::Start(suite_start))?;

    for record in records {
        write_test_case(&mut writer, record)?;
    }

    writer.write_event(Event::End(BytesEnd::new("testsuite")))?;
    writer.write_event(Event::End(BytesEnd::new("testsuites")))?;

    let result = writer.into_inner().into_inner();
    let xml = String::from_utf8(result)?;
    Ok(xml)
}

fn write_test_case<W: std::io::Write>(writer: &mut Writer<W>, record: &TestRecord) -> Result<()> {
    let mut case_start = BytesStart::new("testcase");
    case_start.push_attribute(("name", record.name.as_str()));
    case_start.push_attribute(("classname", "e2e"));
    writer.write_event(Event::Start(case_start))?;

    if let Some(error) = record.error.as_deref().filter(|e| !e.is_empty()) {
        let mut fail_start = BytesStart::new("failure");
        fail_start.push_attribute(("message", error));
        fail_start.push_attribute(("type", "AssertionError"));
        writer.write_event(Event::Start(fail_start))?;
        writer.write_event(Event::Text(BytesText::new(error)))?;
        writer.write_event(Event::End(BytesEnd::new("failure")))?;
    }

    if !record.steps.is_empty() {
        writer.write_event(Event::Start(BytesStart::new("system-out")))?;
        writer.write_event(Event::Text(BytesText::new(&record.steps.join("\n"))))?;
        writer.write_event(Event::End(BytesEnd::new("system-out")))?;
    }

    writer.write_event(Event::End(BytesEnd::new("testcase")))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_junit_xml() {
        let mut login = TestRecord::new("Login Flow");
        login.step("open app");
        login.step("tap login");
        let mut checkout = TestRecord::new("Checkout Flow");
        checkout.fail("Element not found".to_string());

        let xml = generate_junit_xml(&[login, checkout], "2023-01-01 12:00:00")
            .expect("Failed to generate XML");

        assert!(xml.contains(r#"<testsuites name="end-end-tests""#));
        assert!(xml.contains(r#"tests="2""#));
        assert!(xml.contains(r#"failures="1""#));
        assert!(xml.contains(r#"<testcase name="Login Flow""#));
        assert!(xml.contains("<system-out>open app\ntap login</system-out>"));
        assert!(xml.contains(r#"message="Element not found""#));
    }

    #[test]
    fn test_non_ascii_text_survives() {
        let mut record = TestRecord::new("Đăng nhập");
        record.fail("Không tìm thấy nút".to_string());

        let xml = generate_junit_xml(&[record], "2023-01-01 12:00:00").unwrap();
        assert!(xml.contains(r#"<testcase name="Đăng nhập""#));
        assert!(xml.contains(">Không tìm thấy nút</failure>"));
    }

    #[test]
    fn test_empty_run_is_valid_suite() {
        let xml = generate_junit_xml(&[], "2023-01-01 12:00:00").unwrap();
        assert!(xml.contains(r#"tests="0""#));
        assert!(xml.ends_with("</testsuites>"));
    }
}

use crate::command::assert_cmd_snapshot;

fn seq() -> crate::command::Command {
    crate::enumdate(["seq"])
}

// The recurrence logic itself is tested extensively by unit tests within the
// library. These tests focus on how the CLI maps onto it.

#[test]
fn rules() {
    assert_cmd_snapshot!(
        seq().args(["yearly-by-month-day", "-c3", "2018-08-05"]),
        @r"
    success: true
    exit_code: 0
    ----- stdout -----
    2018-08-05
    2019-08-05
    2020-08-05

    ----- stderr -----
    ",
    );
    assert_cmd_snapshot!(
        seq().args(["yearly-by-day", "-m", "aug", "-n1", "-w", "fri", "-c3"])
            .arg("2018-08-03"),
        @r"
    success: true
    exit_code: 0
    ----- stdout -----
    2018-08-03
    2019-08-02
    2020-08-07

    ----- stderr -----
    ",
    );
    assert_cmd_snapshot!(
        seq().args(["monthly-by-day", "-c3", "2018-08-03"]),
        @r"
    success: true
    exit_code: 0
    ----- stdout -----
    2018-08-03
    2018-09-07
    2018-10-05

    ----- stderr -----
    ",
    );
    assert_cmd_snapshot!(
        seq().args(["weekly", "-w", "tue", "-c3", "2021-08-02"]),
        @r"
    success: true
    exit_code: 0
    ----- stdout -----
    2021-08-02
    2021-08-03
    2021-08-10

    ----- stderr -----
    ",
    );
    assert_cmd_snapshot!(
        seq().args(["daily", "-i3", "-c3"]),
        @r"
    success: true
    exit_code: 0
    ----- stdout -----
    2024-07-20
    2024-07-23
    2024-07-26

    ----- stderr -----
    ",
    );
}

#[test]
fn derived_from_today() {
    // 2024-07-20 is the third Saturday of July.
    assert_cmd_snapshot!(
        seq().args(["monthly-by-day", "-c3"]),
        @r"
    success: true
    exit_code: 0
    ----- stdout -----
    2024-07-20
    2024-08-17
    2024-09-21

    ----- stderr -----
    ",
    );
}

#[test]
fn missing_days_are_skipped() {
    assert_cmd_snapshot!(
        seq().args(["monthly-by-month-day", "-d31", "-c4", "2024-01-31"]),
        @r"
    success: true
    exit_code: 0
    ----- stdout -----
    2024-01-31
    2024-03-31
    2024-05-31
    2024-07-31

    ----- stderr -----
    ",
    );
    assert_cmd_snapshot!(
        seq().args(["yearly-by-month-day", "-c3", "2024-02-29"]),
        @r"
    success: true
    exit_code: 0
    ----- stdout -----
    2024-02-29
    2028-02-29
    2032-02-29

    ----- stderr -----
    ",
    );
}

#[test]
fn negative_parameters() {
    assert_cmd_snapshot!(
        seq().args(["monthly-by-day", "-n", "-1", "-w", "fri", "-c4"])
            .arg("2024-07-26"),
        @r"
    success: true
    exit_code: 0
    ----- stdout -----
    2024-07-26
    2024-08-30
    2024-09-27
    2024-10-25

    ----- stderr -----
    ",
    );
    assert_cmd_snapshot!(
        seq().args(["monthly-by-month-day", "-d", "-1", "-c3", "2024-01-31"]),
        @r"
    success: true
    exit_code: 0
    ----- stdout -----
    2024-01-31
    2024-02-29
    2024-03-31

    ----- stderr -----
    ",
    );
}

#[test]
fn week_start() {
    assert_cmd_snapshot!(
        seq().args(["weekly", "-w", "wed", "-i2", "-c4"]),
        @r"
    success: true
    exit_code: 0
    ----- stdout -----
    2024-07-20
    2024-07-31
    2024-08-14
    2024-08-28

    ----- stderr -----
    ",
    );
    // Today is a Saturday. With weeks starting on Thursday, the Wednesday
    // after it is in the same week, so it isn't skipped by the interval.
    assert_cmd_snapshot!(
        seq().args(["weekly", "-w", "wed", "-i2", "-c4", "--week-start=th"]),
        @r"
    success: true
    exit_code: 0
    ----- stdout -----
    2024-07-20
    2024-07-24
    2024-08-07
    2024-08-21

    ----- stderr -----
    ",
    );
}

#[test]
fn combinations_are_merged() {
    assert_cmd_snapshot!(
        seq().args(["weekly", "-w", "wed,mon", "-c4", "2021-08-04"]),
        @r"
    success: true
    exit_code: 0
    ----- stdout -----
    2021-08-04
    2021-08-09
    2021-08-11
    2021-08-16

    ----- stderr -----
    ",
    );
    assert_cmd_snapshot!(
        seq().args(["weekly", "-w", "1", "-w3,5", "-c6", "2024-07-22"]),
        @r"
    success: true
    exit_code: 0
    ----- stdout -----
    2024-07-22
    2024-07-24
    2024-07-26
    2024-07-29
    2024-07-31
    2024-08-02

    ----- stderr -----
    ",
    );
    assert_cmd_snapshot!(
        seq().args(["monthly-by-month-day", "-d", "1,15", "-c5"]),
        @r"
    success: true
    exit_code: 0
    ----- stdout -----
    2024-07-20
    2024-08-01
    2024-08-15
    2024-09-01
    2024-09-15

    ----- stderr -----
    ",
    );
}

#[test]
fn until() {
    assert_cmd_snapshot!(
        seq().args(["monthly-by-day", "-n", "-1", "-w", "fri"])
            .args(["-u", "2024-10-01", "2024-07-26"]),
        @r"
    success: true
    exit_code: 0
    ----- stdout -----
    2024-07-26
    2024-08-30
    2024-09-27

    ----- stderr -----
    ",
    );
    // Whichever of the count or until is reached first wins.
    assert_cmd_snapshot!(
        seq().args(["daily", "-u", "2024-07-30", "-c2"]),
        @r"
    success: true
    exit_code: 0
    ----- stdout -----
    2024-07-20
    2024-07-21

    ----- stderr -----
    ",
    );
    assert_cmd_snapshot!(
        seq().args(["daily", "-u", "2024-07-22", "-c10"]),
        @r"
    success: true
    exit_code: 0
    ----- stdout -----
    2024-07-20
    2024-07-21
    2024-07-22

    ----- stderr -----
    ",
    );
}

#[test]
fn forward_to() {
    assert_cmd_snapshot!(
        seq().args(["weekly", "-w", "tue", "-f", "2021-08-03", "-c3"])
            .arg("2021-08-02"),
        @r"
    success: true
    exit_code: 0
    ----- stdout -----
    2021-08-03
    2021-08-10
    2021-08-17

    ----- stderr -----
    ",
    );
    // The cadence of every other month is kept, counting from January.
    assert_cmd_snapshot!(
        seq().args(["monthly-by-day", "-i2", "-f", "2024-06-10", "-c3"])
            .arg("2024-01-01"),
        @r"
    success: true
    exit_code: 0
    ----- stdout -----
    2024-07-01
    2024-09-02
    2024-11-04

    ----- stderr -----
    ",
    );
}

#[test]
fn also() {
    assert_cmd_snapshot!(
        seq().args(["yearly-by-month-day", "-c4", "-a", "2024-12-24"])
            .arg("2024-07-04"),
        @r"
    success: true
    exit_code: 0
    ----- stdout -----
    2024-07-04
    2024-12-24
    2025-07-04
    2026-07-04

    ----- stderr -----
    ",
    );
    // Dates produced by the rule aren't repeated.
    assert_cmd_snapshot!(
        seq().args(["yearly-by-month-day", "-c4", "-a2025-07-04,2024-12-24"])
            .arg("2024-07-04"),
        @r"
    success: true
    exit_code: 0
    ----- stdout -----
    2024-07-04
    2024-12-24
    2025-07-04
    2026-07-04

    ----- stderr -----
    ",
    );
    assert_cmd_snapshot!(
        seq().args(["yearly-by-month-day", "-u", "2025-01-01"])
            .args(["-a", "2024-12-24", "-a", "2025-02-01", "2024-07-04"]),
        @r"
    success: true
    exit_code: 0
    ----- stdout -----
    2024-07-04
    2024-12-24

    ----- stderr -----
    ",
    );
}

#[test]
fn with_weekday() {
    assert_cmd_snapshot!(
        seq().args(["monthly-by-month-day", "-d", "-1", "-W", "-c3"])
            .arg("2024-01-31"),
        @r"
    success: true
    exit_code: 0
    ----- stdout -----
    2024-01-31 Wed
    2024-02-29 Thu
    2024-03-31 Sun

    ----- stderr -----
    ",
    );
}

#[test]
fn errors() {
    assert_cmd_snapshot!(
        seq(),
        @r"
    success: false
    exit_code: 1
    ----- stdout -----

    ----- stderr -----
    missing required <rule>
    ",
    );
    assert_cmd_snapshot!(
        seq().args(["hourly"]),
        @r"
    success: false
    exit_code: 1
    ----- stdout -----

    ----- stderr -----
    <rule>: unrecognized recurrence kind: `hourly`
    ",
    );
    assert_cmd_snapshot!(
        seq().args(["weekly", "-d5"]),
        @r"
    success: false
    exit_code: 1
    ----- stdout -----

    ----- stderr -----
    the 'day' parameter cannot be used with weekly recurrences
    ",
    );
    assert_cmd_snapshot!(
        seq().args(["yearly-by-month-day", "-m", "feb", "-d", "30"]),
        @r"
    success: false
    exit_code: 1
    ----- stdout -----

    ----- stderr -----
    invalid yearly-by-month-day recurrence: day `30` never occurs in Feb (it has at most 29 days)
    ",
    );
    assert_cmd_snapshot!(
        seq().args(["monthly-by-day", "-n6"]),
        @r"
    success: false
    exit_code: 1
    ----- stdout -----

    ----- stderr -----
    invalid monthly-by-day recurrence: invalid nth weekday `6` (values must be in range 1..=5 or -5..=-1)
    ",
    );
    assert_cmd_snapshot!(
        seq().args(["daily", "-u", "2024-07-01"]),
        @r"
    success: false
    exit_code: 1
    ----- stdout -----

    ----- stderr -----
    until date 2024-07-01 is before the first date 2024-07-20
    ",
    );
    assert_cmd_snapshot!(
        seq().args(["weekly", "-w", "fri,someday"]),
        @r"
    success: false
    exit_code: 1
    ----- stdout -----

    ----- stderr -----
    -w/--weekday: failed to parse `someday` within sequence `fri,someday`: unrecognized weekday: `someday`
    ",
    );
    assert_cmd_snapshot!(
        seq().args(["yearly-by-day", "-m13"]),
        @r"
    success: false
    exit_code: 1
    ----- stdout -----

    ----- stderr -----
    -m/--month: failed to parse `13` within sequence `13`: parsed `13` as an integer month, but it's not in the required range of `1..=12`
    ",
    );
}

#[test]
fn version() {
    assert_cmd_snapshot!(
        seq().arg("--version"),
        @r"
    success: true
    exit_code: 0
    ----- stdout -----
    enumdate 0.1.0

    ----- stderr -----
    ",
    );
}

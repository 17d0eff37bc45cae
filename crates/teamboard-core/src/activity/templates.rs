//! Default note bodies offered when logging an activity.

use super::ActivityType;

pub const SALES_TEMPLATE: &str = indoc::indoc! {"
    【客戶資料】
    Name:
    講左3Q? 有咩feedback?
    Fact Find 重點:

    【面談內容】
    Sell左咩Plan?
    客戶反應/抗拒點:

    【下一步】
    下次見面日期:
    Action Items:"};

pub const RECRUIT_TEMPLATE: &str = indoc::indoc! {"
    【準增員資料】
    Name:
    背景/現職:
    對現狀不滿 (Pain Points):
    對行業最大顧慮:

    【面談內容】
    Sell 左咩 Vision?:
    有無邀請去Team Dinner / Recruitment Talk?

    【下一步】
    下次跟進日期:
    Action Items:"};

pub const NEWCOMER_TEMPLATE: &str = indoc::indoc! {"
    【新人跟進】
    新人 Name:
    今日進度 (考牌/Training/出Code):
    遇到咩困難?:
    Leader 俾左咩建議?:

    【下一步】
    Target:
    下次 Review 日期:"};

/// Note body to pre-fill for an activity of the given type.
pub fn note_template(activity_type: ActivityType) -> &'static str {
    match activity_type {
        ActivityType::RecruitTalk => RECRUIT_TEMPLATE,
        ActivityType::CandidateExam | ActivityType::NewMemberCode => NEWCOMER_TEMPLATE,
        ActivityType::Meeting | ActivityType::InsuranceTalk | ActivityType::PolicySigned => {
            SALES_TEMPLATE
        }
    }
}

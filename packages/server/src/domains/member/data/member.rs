use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::common::MemberNo;
use crate::domains::eligibility::EligibilityOutcome;
use crate::domains::loans::LoanStatus;
use crate::domains::member::models::{Member, MemberLoanRow, MemberNumberRow, MemberSummary};
use crate::domains::savings::SavingsSnapshot;

/// Member API data type
///
/// Full member record plus its opaque token. The internal row id is never
/// exposed; callers address members by token.
#[derive(Debug, Clone, Serialize)]
pub struct MemberData {
    pub token: String,
    #[serde(flatten)]
    pub member: Member,
}

impl MemberData {
    pub fn new(member: Member, token: String) -> Self {
        Self { token, member }
    }
}

/// Row of the paginated member list
#[derive(Debug, Clone, Serialize)]
pub struct MemberListItem {
    pub token: String,
    pub member_no: MemberNo,
    pub name: String,
    pub surname: Option<String>,
    pub national_id: Option<String>,
    pub mobile1: Option<String>,
    pub join_date: Option<NaiveDate>,
    pub image: Option<String>,
    /// Current savings total (latest ledger entry, interest included)
    pub total_saving: Decimal,
}

impl MemberListItem {
    pub fn new(row: MemberSummary, token: String) -> Self {
        Self {
            token,
            member_no: row.member_no,
            name: row.name,
            surname: row.surname,
            national_id: row.national_id,
            mobile1: row.mobile1,
            join_date: row.join_date,
            image: row.image,
            total_saving: row.total_saving,
        }
    }
}

/// Member detail page: record, savings, pending loan and eligibility
#[derive(Debug, Clone, Serialize)]
pub struct MemberDetailData {
    #[serde(flatten)]
    pub member: MemberData,
    pub months_since_join: Option<i64>,
    /// Balance of the latest loan waiting for disbursement, `null` if none
    pub loan_pending: Option<Decimal>,
    pub savings: SavingsSnapshot,
    pub total_savings: Decimal,
    pub eligibility: EligibilityOutcome,
}

#[derive(Debug, Clone, Serialize)]
pub struct MemberNumberItem {
    pub token: String,
    pub member_no: MemberNo,
    pub image: Option<String>,
    pub join_date: Option<NaiveDate>,
}

impl MemberNumberItem {
    pub fn new(row: MemberNumberRow, token: String) -> Self {
        Self {
            token,
            member_no: row.member_no,
            image: row.image,
            join_date: row.join_date,
        }
    }
}

/// Member with a loan application under processing
#[derive(Debug, Clone, Serialize)]
pub struct InProcessItem {
    pub token: String,
    pub member_no: MemberNo,
    pub name: String,
    pub loan_id: i64,
    pub status: LoanStatus,
}

impl InProcessItem {
    pub fn new(row: MemberLoanRow, token: String) -> Self {
        Self {
            token,
            member_no: row.member_no,
            name: row.name,
            loan_id: row.loan_id,
            status: LoanStatus::from_code(row.status),
        }
    }
}

/// Answer to "may this member take a new loan?"
#[derive(Debug, Clone, Serialize)]
pub struct EligibilityCheckData {
    pub token: String,
    pub member_no: MemberNo,
    pub name: String,
    pub join_date: Option<NaiveDate>,
    pub account_no: Option<String>,
    pub account_name: Option<String>,
    pub ifsc_code: Option<String>,
    pub bank_name: Option<String>,
    #[serde(flatten)]
    pub outcome: EligibilityOutcome,
}

impl EligibilityCheckData {
    pub fn new(member: Member, token: String, outcome: EligibilityOutcome) -> Self {
        Self {
            token,
            member_no: member.member_no,
            name: member.name,
            join_date: member.join_date,
            account_no: member.account_no,
            account_name: member.account_name,
            ifsc_code: member.ifsc_code,
            bank_name: member.bank_name,
            outcome,
        }
    }
}

use crate::{
    error::LedgerSourceError,
    model::{GroupId, GroupInfo, GroupLedger},
};
use groupsplit_domain::model::{Member, MemberId};
use std::collections::HashMap;

pub trait LedgerSource: Send + Sync {
    fn groups(&self) -> Result<Vec<GroupInfo>, LedgerSourceError>;

    fn load(&self, group: GroupId) -> Result<GroupLedger, LedgerSourceError>;
}

pub trait MemberDirectory: Send + Sync {
    fn display_name(&self, member_id: MemberId) -> Option<&str>;
}

impl MemberDirectory for HashMap<MemberId, String> {
    fn display_name(&self, member_id: MemberId) -> Option<&str> {
        self.get(&member_id).map(String::as_str)
    }
}

impl MemberDirectory for [Member] {
    fn display_name(&self, member_id: MemberId) -> Option<&str> {
        self.iter()
            .find(|member| member.id == member_id)
            .map(|member| member.display_name.as_str())
    }
}

impl MemberDirectory for Vec<Member> {
    fn display_name(&self, member_id: MemberId) -> Option<&str> {
        self.as_slice().display_name(member_id)
    }
}

impl MemberDirectory for GroupLedger {
    fn display_name(&self, member_id: MemberId) -> Option<&str> {
        self.members.display_name(member_id)
    }
}

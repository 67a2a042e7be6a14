//! Menu choices of the interactive console

use std::str::FromStr;

pub const MENU: &str = "\
===== Library Management Menu =====
1. Add Member
2. Add Book
3. Update Member Email
4. Update Book Stock
5. Delete Member
6. Delete Book
7. Borrow Book
8. Return Book
9. List Books
10. Search Books
11. Member Details
0. Exit";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Exit,
    AddMember,
    AddBook,
    UpdateMemberEmail,
    UpdateBookStock,
    DeleteMember,
    DeleteBook,
    BorrowBook,
    ReturnBook,
    ListBooks,
    SearchBooks,
    MemberDetails,
}

impl FromStr for MenuChoice {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim() {
            "0" => MenuChoice::Exit,
            "1" => MenuChoice::AddMember,
            "2" => MenuChoice::AddBook,
            "3" => MenuChoice::UpdateMemberEmail,
            "4" => MenuChoice::UpdateBookStock,
            "5" => MenuChoice::DeleteMember,
            "6" => MenuChoice::DeleteBook,
            "7" => MenuChoice::BorrowBook,
            "8" => MenuChoice::ReturnBook,
            "9" => MenuChoice::ListBooks,
            "10" => MenuChoice::SearchBooks,
            "11" => MenuChoice::MemberDetails,
            _ => return Err(()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_choices() {
        assert_eq!("0".parse(), Ok(MenuChoice::Exit));
        assert_eq!(" 7 ".parse(), Ok(MenuChoice::BorrowBook));
        assert_eq!("11".parse(), Ok(MenuChoice::MemberDetails));
        assert_eq!("12".parse::<MenuChoice>(), Err(()));
        assert_eq!("add".parse::<MenuChoice>(), Err(()));
        assert_eq!("".parse::<MenuChoice>(), Err(()));
    }
}
